//! Flat view models handed to page rendering.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declares a label enum mirroring a Contentful "list" validation.
///
/// Labels outside the known set are kept in `Other` and serialize back
/// unchanged.
macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(label) => label,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                match label.as_str() {
                    $($label => Self::$variant,)+
                    _ => Self::Other(label),
                }
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                Self::from(label.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_enum! {
    /// Keycap profile family.
    Shape {
        Uniform => "Uniforme",
        Sculpted => "Sculpté",
    }
}

label_enum! {
    /// Sale state of a keyset.
    Status {
        InStock => "En stock",
        ExtrasGroupBuy => "Extras GB",
        ExtrasInStock => "Extras In-Stock",
        GroupBuyOpen => "GB en cours",
        GroupBuyClosed => "GB terminé",
        InterestCheck => "Interest Check",
        OutOfStock => "Out Of Stock",
    }
}

label_enum! {
    Material {
        AbsDoubleShot => "ABS Double-Shot",
        AbsPadPrinted => "ABS Pad-Printed",
        AbsSimple => "ABS Simple",
        Aluminium => "Aluminium",
        PbtDoubleShot => "PBT Double-Shot",
        PbtDyeSub => "PBT Dye-Sub",
        PbtLaserPrinted => "PBT Laser printed",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationLink {
    pub title: String,
    pub slug: String,
    pub abbreviation: String,
    pub shape: Shape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub navbar_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar_icon_name: Option<String>,
}

/// Navigation links keyed by shape, each list in title order.
pub type ShapedNavigationLinks = BTreeMap<Shape, Vec<NavigationLink>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub title: String,
    pub slug: String,
    pub abbreviation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub navbar_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar_icon_name: Option<String>,
}

/// The profile an article belongs to, flattened into the article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleProfile {
    pub title: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub img: String,
    pub slug: String,
    pub profile: ArticleProfile,
    pub material: Material,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropshippingSite {
    pub title: String,
    pub img: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `icon_text` is an icon name checked by the renderer, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub title: String,
    pub url: String,
    pub icon_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageContent {
    pub title: String,
    pub description: String,
    pub profile_cards: Vec<Profile>,
}
