//! Domain definitions.

pub mod director;
pub mod partner;
pub mod product;

pub use self::{
    director::Director,
    partner::{Partner, PartnerName, PartnerProduct, PartnerType},
    product::Product,
};
