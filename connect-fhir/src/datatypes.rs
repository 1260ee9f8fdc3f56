//! FHIR datatypes shared by the DSTU2 and R4 resource models.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coded value with a fixed set of FHIR codes.
pub trait FhirCode: Copy {
    fn as_str(self) -> &'static str;
}

/// Declares a FHIR code enumeration together with its wire codes.
macro_rules! fhir_code {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
        $vis enum $name {
            $(#[serde(rename = $code)] $variant),+
        }

        impl $crate::datatypes::FhirCode for $name {
            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }
    };
}
pub(crate) use fhir_code;

/// FHIR primitive element.
///
/// Producers write primitives either bare (`"completed"`) or as an element
/// object (`{"value": "completed", "extension": [...]}`). The value is absent
/// when the element only carries extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive<T> {
    pub value: Option<T>,
    pub id: Option<String>,
    pub extension: Vec<Value>,
}

impl<T> From<T> for Primitive<T> {
    fn from(value: T) -> Self {
        Self {
            value: Some(value),
            id: None,
            extension: Vec::new(),
        }
    }
}

impl<T: FhirCode> Primitive<T> {
    pub fn code(&self) -> Option<&'static str> {
        self.value.map(FhirCode::as_str)
    }
}

impl Primitive<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PrimitiveElement<T> {
    value: Option<T>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    extension: Vec<Value>,
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Primitive<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        if raw.is_object() {
            let element: PrimitiveElement<T> = serde_json::from_value(raw).map_err(D::Error::custom)?;
            Ok(Self {
                value: element.value,
                id: element.id,
                extension: element.extension,
            })
        } else {
            T::deserialize(raw).map(Self::from).map_err(D::Error::custom)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    pub system: Option<Primitive<String>>,
    pub version: Option<Primitive<String>>,
    pub code: Option<Primitive<String>>,
    pub display: Option<Primitive<String>>,
    pub user_selected: Option<Primitive<bool>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CodeableConcept {
    #[serde(default)]
    pub coding: Vec<Coding>,
    pub text: Option<Primitive<String>>,
}

impl CodeableConcept {
    pub fn first_code(&self) -> Option<&str> {
        self.coding
            .first()
            .and_then(|coding| coding.code.as_ref())
            .and_then(Primitive::as_deref)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().and_then(Primitive::as_deref)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reference {
    pub reference: Option<Primitive<String>>,
    pub display: Option<Primitive<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Period {
    pub start: Option<Primitive<String>>,
    pub end: Option<Primitive<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quantity {
    pub value: Option<Primitive<f64>>,
    pub unit: Option<Primitive<String>>,
    pub system: Option<Primitive<String>>,
    pub code: Option<Primitive<String>>,
}

/// `medication[x]`: exactly one of the two forms is required.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum Medication {
    #[serde(rename = "medicationCodeableConcept")]
    CodeableConcept(CodeableConcept),
    #[serde(rename = "medicationReference")]
    Reference(Reference),
}
