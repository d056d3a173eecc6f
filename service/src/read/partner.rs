//! [`Partner`] read model definition.
//!
//! [`Partner`]: crate::domain::Partner

pub mod display {
    //! [`Partner`]s overview definitions.

    use std::collections::HashMap;

    use common::Money;

    use crate::domain::{
        director, partner, product, Director, Partner, PartnerName,
        PartnerProduct, PartnerType, Product,
    };

    /// Text shown instead of a related value which cannot be resolved.
    pub const NOT_SPECIFIED: &str = "Not specified";

    /// [`Partner`] resolved for display, along with its ordered products.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Display {
        /// ID of the displayed [`Partner`].
        pub partner_id: partner::Id,

        /// Name of the [`PartnerType`], or [`NOT_SPECIFIED`].
        pub kind: String,

        /// Name of the [`Partner`], or [`NOT_SPECIFIED`].
        pub name: String,

        /// Legal address of the [`Partner`].
        pub address: partner::Address,

        /// Phone of the [`Partner`].
        pub phone: partner::Phone,

        /// Rate of the [`Partner`].
        pub rate: partner::Rate,

        /// Given name of the [`Director`], or [`NOT_SPECIFIED`].
        pub director: String,

        /// Discounted cost of all the [`ProductLine`]s.
        pub total_cost: Money,

        /// Products ordered by the [`Partner`].
        pub products: Vec<ProductLine>,
    }

    /// [`Product`] ordered by a [`Partner`].
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct ProductLine {
        /// Name of the [`Product`].
        pub name: product::Name,

        /// Ordered amount of the [`Product`].
        pub amount: partner::product::Amount,

        /// Discounted cost of the ordered amount.
        pub cost: Money,
    }

    /// Lookup tables [`aggregate`] resolves [`Partner`] relations with.
    #[derive(Clone, Debug, Default)]
    pub struct Lookup {
        /// [`PartnerName`]s by their IDs.
        pub names: HashMap<partner::name::Id, PartnerName>,

        /// [`PartnerType`]s by their IDs.
        pub types: HashMap<partner::kind::Id, PartnerType>,

        /// [`Director`]s by their IDs.
        pub directors: HashMap<director::Id, Director>,

        /// [`Product`]s by their IDs.
        pub products: HashMap<product::Id, Product>,
    }

    /// Builds a [`Display`] for every of the provided `partners`, preserving
    /// their order.
    ///
    /// Orders referring to a [`Product`] missing in the [`Lookup`] are
    /// skipped.
    #[must_use]
    pub fn aggregate(
        partners: &[Partner],
        orders: &[PartnerProduct],
        lookup: &Lookup,
    ) -> Vec<Display> {
        let mut orders_by_partner: HashMap<partner::Id, Vec<_>> =
            HashMap::new();
        for o in orders {
            orders_by_partner.entry(o.partner_id).or_default().push(o);
        }

        partners
            .iter()
            .map(|p| {
                let discount = p.rate.discount();

                let mut total = Money::ZERO;
                let products = orders_by_partner
                    .get(&p.id)
                    .into_iter()
                    .flatten()
                    .filter_map(|o| {
                        let product = lookup.products.get(&o.product_id)?;
                        let cost = product
                            .min_cost
                            .times(o.amount.into())
                            .discounted(discount)
                            .non_negative();
                        total = total + cost;
                        Some(ProductLine {
                            name: product.name.clone(),
                            amount: o.amount,
                            cost: cost.round(),
                        })
                    })
                    .collect();

                Display {
                    partner_id: p.id,
                    kind: lookup
                        .types
                        .get(&p.type_id)
                        .map_or_else(not_specified, |t| t.name.to_string()),
                    name: lookup
                        .names
                        .get(&p.name_id)
                        .map_or_else(not_specified, |n| n.name.to_string()),
                    address: p.address.clone(),
                    phone: p.phone.clone(),
                    rate: p.rate,
                    director: lookup
                        .directors
                        .get(&p.director_id)
                        .map_or_else(not_specified, |d| d.name.to_string()),
                    total_cost: total.round(),
                    products,
                }
            })
            .collect()
    }

    /// Returns [`NOT_SPECIFIED`] text.
    fn not_specified() -> String {
        NOT_SPECIFIED.to_owned()
    }

    #[cfg(test)]
    mod spec {
        use std::str::FromStr as _;

        use common::Money;

        use crate::domain::{
            director, partner, product, Director, Partner, PartnerName,
            PartnerProduct, PartnerType, Product,
        };

        use super::{aggregate, Lookup, NOT_SPECIFIED};

        fn money(s: &str) -> Money {
            Money::from_str(s).unwrap()
        }

        fn product(name: &str, min_cost: &str) -> Product {
            Product {
                id: product::Id::new(),
                name: product::Name::new(name).unwrap(),
                min_cost: money(min_cost),
            }
        }

        fn order(p: &Partner, pr: &Product, amount: i32) -> PartnerProduct {
            PartnerProduct {
                partner_id: p.id,
                product_id: pr.id,
                amount: amount.into(),
            }
        }

        fn partner(rate: i32) -> Partner {
            Partner {
                id: partner::Id::new(),
                name_id: partner::name::Id::new(),
                type_id: partner::kind::Id::new(),
                director_id: director::Id::new(),
                address: partner::Address::new("Moscow").unwrap(),
                phone: partner::Phone::new("+7 495 000 00 00").unwrap(),
                email: None,
                inn: partner::Inn::new("1234567890").unwrap(),
                rate: partner::Rate::new(rate).unwrap(),
            }
        }

        fn lookup_of(products: &[&Product]) -> Lookup {
            Lookup {
                products: products
                    .iter()
                    .map(|&p| (p.id, p.clone()))
                    .collect(),
                ..Lookup::default()
            }
        }

        #[test]
        fn applies_discount_per_line() {
            let p = partner(10);
            let tile = product("Tile", "10.00");
            let glue = product("Glue", "5.00");
            let orders = [order(&p, &tile, 2), order(&p, &glue, 1)];

            let out = aggregate(
                std::slice::from_ref(&p),
                &orders,
                &lookup_of(&[&tile, &glue]),
            );

            assert_eq!(out.len(), 1);
            let costs =
                out[0].products.iter().map(|l| l.cost).collect::<Vec<_>>();
            assert_eq!(costs, [money("19.00"), money("4.75")]);
            assert_eq!(out[0].total_cost, money("23.75"));
            assert_eq!(out[0].total_cost.to_string(), "23.75");
            assert_eq!(out[0].products[0].name.to_string(), "Tile");
            assert_eq!(i32::from(out[0].products[0].amount), 2);
        }

        #[test]
        fn caps_discount() {
            let p = partner(100);
            let tile = product("Tile", "100");
            let orders = [order(&p, &tile, 1)];

            let out = aggregate(
                std::slice::from_ref(&p),
                &orders,
                &lookup_of(&[&tile]),
            );

            assert_eq!(out[0].total_cost, money("85"));
        }

        #[test]
        fn rounds_total_after_accumulation() {
            let p = partner(0);
            let bolt = product("Bolt", "0.005");
            let orders = [order(&p, &bolt, 1), order(&p, &bolt, 1)];

            let out = aggregate(
                std::slice::from_ref(&p),
                &orders,
                &lookup_of(&[&bolt]),
            );

            // Every line rounds to `0.00` on its own (midpoint to even),
            // while their unrounded sum is `0.01`.
            assert_eq!(out[0].products[0].cost, money("0.00"));
            assert_eq!(out[0].products[1].cost, money("0.00"));
            assert_eq!(out[0].total_cost, money("0.01"));
        }

        #[test]
        fn clamps_negative_lines() {
            let p = partner(10);
            let refund = product("Refund", "-3.00");
            let tile = product("Tile", "10.00");
            let orders = [
                order(&p, &refund, 2),
                order(&p, &tile, -1),
                order(&p, &tile, 1),
            ];

            let out = aggregate(
                std::slice::from_ref(&p),
                &orders,
                &lookup_of(&[&refund, &tile]),
            );

            let costs =
                out[0].products.iter().map(|l| l.cost).collect::<Vec<_>>();
            assert_eq!(costs, [Money::ZERO, Money::ZERO, money("9.50")]);
            assert_eq!(out[0].total_cost, money("9.50"));
        }

        #[test]
        fn skips_unknown_products() {
            let p = partner(10);
            let tile = product("Tile", "10.00");
            let ghost = product("Ghost", "1000.00");
            let orders = [order(&p, &ghost, 3), order(&p, &tile, 1)];

            let out = aggregate(
                std::slice::from_ref(&p),
                &orders,
                &lookup_of(&[&tile]),
            );

            assert_eq!(out[0].products.len(), 1);
            assert_eq!(out[0].products[0].name.to_string(), "Tile");
            assert_eq!(out[0].total_cost, money("9.50"));
        }

        #[test]
        fn partner_without_orders_costs_nothing() {
            let p = partner(10);

            let out = aggregate(
                std::slice::from_ref(&p),
                &[],
                &Lookup::default(),
            );

            assert!(out[0].products.is_empty());
            assert_eq!(out[0].total_cost, Money::ZERO);
            assert_eq!(out[0].total_cost.to_string(), "0.00");
        }

        #[test]
        fn resolves_relations() {
            let p = partner(4);
            let mut lookup = Lookup::default();
            drop(lookup.names.insert(
                p.name_id,
                PartnerName {
                    id: p.name_id,
                    name: partner::Name::new("Stroy LLC").unwrap(),
                },
            ));
            drop(lookup.types.insert(
                p.type_id,
                PartnerType {
                    id: p.type_id,
                    name: partner::kind::Name::new("LLC").unwrap(),
                },
            ));
            drop(lookup.directors.insert(
                p.director_id,
                Director {
                    id: p.director_id,
                    family_name: director::Name::new("Ivanov").unwrap(),
                    name: director::Name::new("Ivan").unwrap(),
                    patronymic: director::Name::new("Ivanovich").unwrap(),
                },
            ));

            let out = aggregate(std::slice::from_ref(&p), &[], &lookup);

            assert_eq!(out[0].partner_id, p.id);
            assert_eq!(out[0].name, "Stroy LLC");
            assert_eq!(out[0].kind, "LLC");
            assert_eq!(out[0].director, "Ivan");
            assert_eq!(out[0].address, p.address);
            assert_eq!(out[0].phone, p.phone);
            assert_eq!(out[0].rate, p.rate);
        }

        #[test]
        fn falls_back_on_unresolved_relations() {
            let p = partner(4);

            let out =
                aggregate(std::slice::from_ref(&p), &[], &Lookup::default());

            assert_eq!(out[0].name, NOT_SPECIFIED);
            assert_eq!(out[0].kind, NOT_SPECIFIED);
            assert_eq!(out[0].director, NOT_SPECIFIED);
        }

        #[test]
        fn preserves_partner_order() {
            let partners = [partner(0), partner(10), partner(30)];
            let tile = product("Tile", "100");
            let orders = partners
                .iter()
                .rev()
                .map(|p| order(p, &tile, 1))
                .collect::<Vec<_>>();

            let out = aggregate(&partners, &orders, &lookup_of(&[&tile]));

            let ids = out.iter().map(|d| d.partner_id).collect::<Vec<_>>();
            assert_eq!(ids, partners.iter().map(|p| p.id).collect::<Vec<_>>());
            let totals = out.iter().map(|d| d.total_cost).collect::<Vec<_>>();
            assert_eq!(totals, [money("100"), money("95"), money("85")]);
        }
    }
}
