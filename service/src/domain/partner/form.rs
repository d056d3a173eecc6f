//! [`Form`] of a [`Partner`] and its validation.
//!
//! [`Partner`]: super::Partner

use std::fmt;

use derive_more::{Display, Error};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter};

use crate::domain::{director, Director};

use super::{
    kind, Address, Email, Inn, Name, Partner, PartnerName, Phone, Rate,
};

/// Raw user input of a [`Partner`] edit form.
///
/// [`Partner`]: super::Partner
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Form {
    /// Selected [`PartnerType`], if any.
    ///
    /// [`PartnerType`]: super::PartnerType
    pub type_id: Option<kind::Id>,

    /// Name of the partner organization.
    pub name: String,

    /// Family name of the director.
    pub director_family_name: String,

    /// Given name of the director.
    pub director_name: String,

    /// Patronymic of the director.
    pub director_patronymic: String,

    /// Legal address.
    pub address: String,

    /// Rate, as typed.
    pub rate: String,

    /// Phone number.
    pub phone: String,

    /// Email address, blank if none.
    pub email: String,

    /// Tax identification number, as typed.
    pub inn: String,
}

impl Form {
    /// Creates a new [`Form`] prefilled with the values of an existing
    /// [`Partner`].
    ///
    /// Fields of a missing [`PartnerName`] or [`Director`] are left empty.
    #[must_use]
    pub fn prefilled(
        partner: &Partner,
        name: Option<&PartnerName>,
        director: Option<&Director>,
    ) -> Self {
        let (family_name, given_name, patronymic) =
            director.map_or_else(Default::default, |d| {
                (
                    d.family_name.to_string(),
                    d.name.to_string(),
                    d.patronymic.to_string(),
                )
            });
        Self {
            type_id: Some(partner.type_id),
            name: name.map(|n| n.name.to_string()).unwrap_or_default(),
            director_family_name: family_name,
            director_name: given_name,
            director_patronymic: patronymic,
            address: partner.address.to_string(),
            rate: partner.rate.to_string(),
            phone: partner.phone.to_string(),
            email: partner
                .email
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            inn: partner.inn.to_string(),
        }
    }

    /// Validates this [`Form`] and converts it into a [`Draft`].
    ///
    /// Fields are checked in the order they appear in the form, and the first
    /// failed check is reported.
    ///
    /// # Errors
    ///
    /// With the [`ValidationError`] of the first invalid field.
    pub fn validate(&self) -> Result<Draft, ValidationError> {
        use ValidationError as E;

        let type_id = self.type_id.ok_or(E::TypeNotSelected)?;
        let name = Name::new(self.name.trim()).ok_or(E::NameMissing)?;
        let director_family_name =
            director::Name::new(self.director_family_name.trim())
                .ok_or(E::DirectorFamilyNameMissing)?;
        let director_name = director::Name::new(self.director_name.trim())
            .ok_or(E::DirectorNameMissing)?;
        let director_patronymic =
            director::Name::new(self.director_patronymic.trim())
                .ok_or(E::DirectorPatronymicMissing)?;
        let address =
            Address::new(self.address.trim()).ok_or(E::AddressMissing)?;
        let rate = self.rate.parse::<Rate>().map_err(|_| E::InvalidRate)?;
        let phone = Phone::new(self.phone.trim()).ok_or(E::PhoneMissing)?;

        // Blank email means no email at all.
        let email = if is_blank(&self.email) {
            None
        } else {
            // A single line break may end the address, as the end-of-line
            // anchor tolerates it.
            let email =
                self.email.strip_suffix('\n').unwrap_or(&self.email);
            Some(Email::new(email).ok_or(E::InvalidEmail)?)
        };

        if is_blank(&self.inn) {
            return Err(E::InnMissing);
        }
        let inn = Inn::new(self.inn.as_str()).ok_or(E::InvalidInn)?;

        Ok(Draft {
            type_id,
            name,
            director_family_name,
            director_name,
            director_patronymic,
            address,
            rate,
            phone,
            email,
            inn,
        })
    }
}

/// Checks whether the provided `text` is empty or whitespace only.
fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Checks whether the provided keystroke `text` may be typed into a
/// digit-only field (rate and INN), i.e. starts with a decimal digit.
#[must_use]
pub fn accepts_digit_input(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Validated [`Form`], ready to be persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    /// ID of the selected [`PartnerType`].
    ///
    /// [`PartnerType`]: super::PartnerType
    pub type_id: kind::Id,

    /// Name of the partner organization.
    pub name: Name,

    /// Family name of the director.
    pub director_family_name: director::Name,

    /// Given name of the director.
    pub director_name: director::Name,

    /// Patronymic of the director.
    pub director_patronymic: director::Name,

    /// Legal address.
    pub address: Address,

    /// Rate.
    pub rate: Rate,

    /// Phone number.
    pub phone: Phone,

    /// Email address, if any.
    pub email: Option<Email>,

    /// Tax identification number.
    pub inn: Inn,
}

impl Draft {
    /// Checks this [`Draft`] against the storage limits of its [`Field`]s.
    ///
    /// # Errors
    ///
    /// With all the [`Violation`]s found, if any.
    pub fn check_constraints(&self) -> Result<(), Violations> {
        let values: [(Field, &str); 7] = [
            (Field::Name, self.name.as_ref()),
            (Field::DirectorFamilyName, self.director_family_name.as_ref()),
            (Field::DirectorName, self.director_name.as_ref()),
            (Field::DirectorPatronymic, self.director_patronymic.as_ref()),
            (Field::Address, self.address.as_ref()),
            (Field::Phone, self.phone.as_ref()),
            (
                Field::Email,
                self.email.as_ref().map_or("", AsRef::<str>::as_ref),
            ),
        ];

        let violations = values
            .into_iter()
            .filter_map(|(field, value)| {
                let limit = field.max_length()?;
                let length = value.chars().count();
                (length > limit).then_some(Violation {
                    field,
                    limit,
                    length,
                })
            })
            .collect::<Vec<_>>();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Violations(violations))
        }
    }
}

/// Field of a [`Form`].
#[derive(
    AsRefStr, Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq, StrumDisplay,
)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    /// [`Form::type_id`].
    Type,

    /// [`Form::name`].
    Name,

    /// [`Form::director_family_name`].
    DirectorFamilyName,

    /// [`Form::director_name`].
    DirectorName,

    /// [`Form::director_patronymic`].
    DirectorPatronymic,

    /// [`Form::address`].
    Address,

    /// [`Form::rate`].
    Rate,

    /// [`Form::phone`].
    Phone,

    /// [`Form::email`].
    Email,

    /// [`Form::inn`].
    Inn,
}

impl Field {
    /// Returns the maximum number of characters this [`Field`] may be stored
    /// with, if limited.
    #[must_use]
    pub const fn max_length(self) -> Option<usize> {
        match self {
            Self::Name => Some(255),
            Self::DirectorFamilyName
            | Self::DirectorName
            | Self::DirectorPatronymic
            | Self::Email => Some(100),
            Self::Address => Some(300),
            Self::Phone => Some(20),
            Self::Type | Self::Rate | Self::Inn => None,
        }
    }
}

/// Error of a [`Form`] validation.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// No partner type is selected.
    #[display("Select partner type")]
    TypeNotSelected,

    /// Partner name is blank.
    #[display("Enter partner name")]
    NameMissing,

    /// Director family name is blank.
    #[display("Enter director's family name")]
    DirectorFamilyNameMissing,

    /// Director given name is blank.
    #[display("Enter director's name")]
    DirectorNameMissing,

    /// Director patronymic is blank.
    #[display("Enter director's patronymic")]
    DirectorPatronymicMissing,

    /// Address is blank.
    #[display("Enter address")]
    AddressMissing,

    /// Rate is not a non-negative integer.
    #[display("Rate must be a non-negative integer")]
    InvalidRate,

    /// Phone is blank.
    #[display("Enter phone")]
    PhoneMissing,

    /// Email is provided, but malformed.
    #[display("Enter a valid email address")]
    InvalidEmail,

    /// INN is blank.
    #[display("Enter INN")]
    InnMissing,

    /// INN is not 10 or 12 decimal digits.
    #[display("INN must contain 10 or 12 digits")]
    InvalidInn,
}

impl ValidationError {
    /// Returns the [`Field`] this [`ValidationError`] is about.
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::TypeNotSelected => Field::Type,
            Self::NameMissing => Field::Name,
            Self::DirectorFamilyNameMissing => Field::DirectorFamilyName,
            Self::DirectorNameMissing => Field::DirectorName,
            Self::DirectorPatronymicMissing => Field::DirectorPatronymic,
            Self::AddressMissing => Field::Address,
            Self::InvalidRate => Field::Rate,
            Self::PhoneMissing => Field::Phone,
            Self::InvalidEmail => Field::Email,
            Self::InnMissing | Self::InvalidInn => Field::Inn,
        }
    }
}

/// Value of a [`Field`] exceeding its storage limit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Violation {
    /// Violating [`Field`].
    pub field: Field,

    /// Maximum allowed number of characters.
    pub limit: usize,

    /// Actual number of characters.
    pub length: usize,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            field,
            limit,
            length,
        } = self;
        write!(
            f,
            "{field}: must be at most {limit} characters long, \
             but is {length}",
        )
    }
}

/// Non-empty list of [`Violation`]s found in a [`Draft`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub struct Violations(#[error(not(source))] Vec<Violation>);

impl Violations {
    /// Returns the [`Violation`]s in this list.
    #[must_use]
    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation errors:")?;
        for v in &self.0 {
            write!(f, "\n• {v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use strum::IntoEnumIterator as _;

    use crate::domain::{
        director,
        partner::{self, kind, name},
        Director, Partner, PartnerName,
    };

    use super::{accepts_digit_input, Field, Form, ValidationError};

    fn valid() -> Form {
        Form {
            type_id: Some(kind::Id::new()),
            name: "Stroy LLC".into(),
            director_family_name: "Ivanov".into(),
            director_name: "Ivan".into(),
            director_patronymic: "Ivanovich".into(),
            address: "1 Lenina St, Moscow".into(),
            rate: "10".into(),
            phone: "+7 495 123 45 67".into(),
            email: "info@stroy.ru".into(),
            inn: "1234567890".into(),
        }
    }

    fn error_of(form: &Form) -> ValidationError {
        form.validate().unwrap_err()
    }

    #[test]
    fn accepts_valid_form() {
        let form = valid();
        let draft = form.validate().unwrap();

        assert_eq!(Some(draft.type_id), form.type_id);
        assert_eq!(draft.name.to_string(), "Stroy LLC");
        assert_eq!(draft.director_family_name.to_string(), "Ivanov");
        assert_eq!(draft.director_name.to_string(), "Ivan");
        assert_eq!(draft.director_patronymic.to_string(), "Ivanovich");
        assert_eq!(draft.address.to_string(), "1 Lenina St, Moscow");
        assert_eq!(i32::from(draft.rate), 10);
        assert_eq!(draft.phone.to_string(), "+7 495 123 45 67");
        assert_eq!(
            draft.email.map(|e| e.to_string()).as_deref(),
            Some("info@stroy.ru"),
        );
        assert_eq!(draft.inn.to_string(), "1234567890");
    }

    #[test]
    fn trims_text_fields() {
        let form = Form {
            name: "  Stroy LLC ".into(),
            director_family_name: "\tIvanov".into(),
            director_name: "Ivan\n".into(),
            director_patronymic: " Ivanovich ".into(),
            address: " Moscow ".into(),
            rate: " 42 ".into(),
            phone: " 123 ".into(),
            ..valid()
        };
        let draft = form.validate().unwrap();

        assert_eq!(draft.name.to_string(), "Stroy LLC");
        assert_eq!(draft.director_family_name.to_string(), "Ivanov");
        assert_eq!(draft.director_name.to_string(), "Ivan");
        assert_eq!(draft.director_patronymic.to_string(), "Ivanovich");
        assert_eq!(draft.address.to_string(), "Moscow");
        assert_eq!(i32::from(draft.rate), 42);
        assert_eq!(draft.phone.to_string(), "123");
    }

    #[test]
    fn requires_fields() {
        use ValidationError as E;

        let cases: [(fn(&mut Form), E); 9] = [
            (|f| f.type_id = None, E::TypeNotSelected),
            (|f| f.name = "   ".into(), E::NameMissing),
            (|f| f.director_family_name.clear(), E::DirectorFamilyNameMissing),
            (|f| f.director_name = "\t".into(), E::DirectorNameMissing),
            (|f| f.director_patronymic.clear(), E::DirectorPatronymicMissing),
            (|f| f.address = " ".into(), E::AddressMissing),
            (|f| f.rate.clear(), E::InvalidRate),
            (|f| f.phone = "  ".into(), E::PhoneMissing),
            (|f| f.inn = " ".into(), E::InnMissing),
        ];
        for (spoil, expected) in cases {
            let mut form = valid();
            spoil(&mut form);

            assert_eq!(error_of(&form), expected);
        }
    }

    #[test]
    fn reports_first_failure() {
        let form = Form {
            type_id: None,
            ..Form::default()
        };
        assert_eq!(error_of(&form), ValidationError::TypeNotSelected);

        let form = Form {
            address: String::new(),
            rate: "abc".into(),
            inn: "1".into(),
            ..valid()
        };
        assert_eq!(error_of(&form), ValidationError::AddressMissing);

        let form = Form {
            email: "foo@bar".into(),
            inn: String::new(),
            ..valid()
        };
        assert_eq!(error_of(&form), ValidationError::InvalidEmail);
    }

    #[test]
    fn validates_rate() {
        for rate in ["0", "42", "+7", " 15 "] {
            let form = Form {
                rate: rate.into(),
                ..valid()
            };
            assert!(form.validate().is_ok(), "rate `{rate}`");
        }

        for rate in ["-1", "abc", "1.5", "", "4 2", "99999999999"] {
            let form = Form {
                rate: rate.into(),
                ..valid()
            };
            assert_eq!(
                error_of(&form),
                ValidationError::InvalidRate,
                "rate `{rate}`",
            );
        }
    }

    #[test]
    fn validates_email() {
        let form = Form {
            email: "foo@bar.com".into(),
            ..valid()
        };
        assert!(form.validate().is_ok());

        for email in ["", "   "] {
            let form = Form {
                email: email.into(),
                ..valid()
            };
            assert_eq!(form.validate().unwrap().email, None);
        }

        let form = Form {
            email: "foo@bar.com\n".into(),
            ..valid()
        };
        assert_eq!(
            form.validate().unwrap().email.map(|e| e.to_string()),
            Some("foo@bar.com".to_owned()),
        );

        for email in [
            "foo@bar",
            "foo",
            "a@b@c.d",
            " foo@bar.com",
            "f o@b.c",
            "foo@bar.com\n\n",
            "foo@bar.com \n",
            "foo@bar.com\r\n",
        ] {
            let form = Form {
                email: email.into(),
                ..valid()
            };
            assert_eq!(
                error_of(&form),
                ValidationError::InvalidEmail,
                "email `{email}`",
            );
        }
    }

    #[test]
    fn validates_inn() {
        for inn in ["1234567890", "123456789012"] {
            let form = Form {
                inn: inn.into(),
                ..valid()
            };
            assert!(form.validate().is_ok(), "INN `{inn}`");
        }

        for inn in [
            "123456789",
            "12345678901",
            "1234567890123",
            "12345678a0",
            "1234-567890",
            " 1234567890",
            "１２３４５６７８９０",
        ] {
            let form = Form {
                inn: inn.into(),
                ..valid()
            };
            assert_eq!(
                error_of(&form),
                ValidationError::InvalidInn,
                "INN `{inn}`",
            );
        }
    }

    #[test]
    fn every_error_names_its_field() {
        assert_eq!(ValidationError::TypeNotSelected.field(), Field::Type);
        assert_eq!(ValidationError::InvalidRate.field(), Field::Rate);
        assert_eq!(ValidationError::InnMissing.field(), Field::Inn);
        assert_eq!(ValidationError::InvalidInn.field(), Field::Inn);
        assert_eq!(ValidationError::InvalidEmail.field().to_string(), "email");
        assert_eq!(
            ValidationError::DirectorFamilyNameMissing.field().to_string(),
            "directorFamilyName",
        );
    }

    #[test]
    fn checks_constraints() {
        let draft = valid().validate().unwrap();
        assert!(draft.check_constraints().is_ok());

        let form = Form {
            name: "N".repeat(255),
            phone: "1".repeat(20),
            ..valid()
        };
        assert!(form.validate().unwrap().check_constraints().is_ok());

        let form = Form {
            name: "N".repeat(256),
            address: "Я".repeat(301),
            phone: "1".repeat(21),
            ..valid()
        };
        let violations =
            form.validate().unwrap().check_constraints().unwrap_err();
        let fields = violations
            .as_slice()
            .iter()
            .map(|v| v.field)
            .collect::<Vec<_>>();
        assert_eq!(fields, [Field::Name, Field::Address, Field::Phone]);
        assert_eq!(
            violations.to_string(),
            "Validation errors:\n\
             • name: must be at most 255 characters long, but is 256\n\
             • address: must be at most 300 characters long, but is 301\n\
             • phone: must be at most 20 characters long, but is 21",
        );
    }

    #[test]
    fn unlimited_fields_are_known() {
        let unlimited = Field::iter()
            .filter(|f| f.max_length().is_none())
            .collect::<Vec<_>>();
        assert_eq!(unlimited, [Field::Type, Field::Rate, Field::Inn]);
    }

    #[test]
    fn filters_digit_keystrokes() {
        assert!(accepts_digit_input("0"));
        assert!(accepts_digit_input("7"));
        assert!(accepts_digit_input("42"));

        assert!(!accepts_digit_input(""));
        assert!(!accepts_digit_input("a"));
        assert!(!accepts_digit_input("-"));
        assert!(!accepts_digit_input(" "));
        assert!(!accepts_digit_input("a1"));
    }

    #[test]
    fn prefills_from_partner() {
        let draft = valid().validate().unwrap();
        let partner = Partner {
            id: partner::Id::new(),
            name_id: name::Id::new(),
            type_id: draft.type_id,
            director_id: director::Id::new(),
            address: draft.address.clone(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
            inn: draft.inn.clone(),
            rate: draft.rate,
        };
        let name = PartnerName {
            id: partner.name_id,
            name: draft.name.clone(),
        };
        let director = Director {
            id: partner.director_id,
            family_name: draft.director_family_name.clone(),
            name: draft.director_name.clone(),
            patronymic: draft.director_patronymic.clone(),
        };

        let form = Form::prefilled(&partner, Some(&name), Some(&director));
        assert_eq!(
            form,
            Form {
                type_id: Some(draft.type_id),
                ..valid()
            },
        );
        assert_eq!(form.validate().unwrap(), draft);

        let form = Form::prefilled(&partner, None, None);
        assert_eq!(form.name, "");
        assert_eq!(form.director_family_name, "");
        assert_eq!(form.director_name, "");
        assert_eq!(form.director_patronymic, "");
        assert_eq!(form.inn, "1234567890");
        assert_eq!(error_of(&form), ValidationError::NameMissing);
    }
}
