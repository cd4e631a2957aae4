use serde::{Deserialize, Serialize};

/// Excipient category dimensions carried in the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExcipientCategory {
    ReducingSugar,
    SugarAlcohol,
    Polymer,
    InorganicSalt,
    Filler,
    Lubricant,
    Disintegrant,
}

/// Flag lexicon: known excipient substring -> category flag.
///
/// FROZEN: must match the tables used when the classifier was trained.
/// Matching is substring containment inside the normalized name, so
/// "lactose monohydrate" matches the "lactose" key, and a name may set
/// several flags at once.
const CATEGORY_FLAG_LEXICON: [(&str, ExcipientCategory); 13] = [
    ("lactose", ExcipientCategory::ReducingSugar),
    ("mannitol", ExcipientCategory::SugarAlcohol),
    ("sorbitol", ExcipientCategory::SugarAlcohol),
    ("hpmc", ExcipientCategory::Polymer),
    ("pvp", ExcipientCategory::Polymer),
    ("pvp k30", ExcipientCategory::Polymer),
    ("dcp", ExcipientCategory::InorganicSalt),
    ("sodium bicarbonate", ExcipientCategory::InorganicSalt),
    ("mcc", ExcipientCategory::Filler),
    ("microcrystalline cellulose", ExcipientCategory::Filler),
    ("magnesium stearate", ExcipientCategory::Lubricant),
    ("sodium starch glycolate", ExcipientCategory::Disintegrant),
    ("starch", ExcipientCategory::Disintegrant),
];

/// Label lexicon: normalized excipient name -> human-readable category.
///
/// Looked up by exact key, not substring. Kept deliberately separate from
/// [`CATEGORY_FLAG_LEXICON`]: the two tables disagree in coverage (this one
/// carries "calcium phosphate", the flag table carries "sodium bicarbonate")
/// and only the flag table is load-bearing for the vector layout. Do not
/// merge them.
const CATEGORY_LABEL_LEXICON: [(&str, &str); 13] = [
    ("lactose", "reducing sugar excipient"),
    ("mannitol", "non-reducing sugar alcohol excipient"),
    ("sorbitol", "non-reducing sugar alcohol excipient"),
    ("mcc", "inert filler excipient"),
    ("microcrystalline cellulose", "inert filler excipient"),
    ("pvp", "polymeric binder excipient"),
    ("pvp k30", "polymeric binder excipient"),
    ("hpmc", "polymeric excipient"),
    ("magnesium stearate", "lubricant excipient"),
    ("sodium starch glycolate", "disintegrant excipient"),
    ("starch", "disintegrant excipient"),
    ("dcp", "inorganic filler excipient"),
    ("calcium phosphate", "inorganic filler excipient"),
];

/// Label used when the excipient is not in the label lexicon.
pub const FALLBACK_CATEGORY_LABEL: &str =
    "pharmaceutical excipient with variable compatibility behavior";

/// Seven category-membership flags in feature-vector order. Categories are
/// not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExcipientFlagSet {
    pub is_reducing_sugar: bool,
    pub is_sugar_alcohol: bool,
    pub is_polymer: bool,
    pub is_inorganic_salt: bool,
    pub is_filler: bool,
    pub is_lubricant: bool,
    pub is_disintegrant: bool,
}

impl ExcipientFlagSet {
    /// Derives the flags by substring search of the flag lexicon keys inside
    /// an already-normalized excipient name.
    pub fn from_normalized_name(normalized_name: &str) -> Self {
        let mut flags = Self::default();
        for (key, category) in CATEGORY_FLAG_LEXICON {
            if normalized_name.contains(key) {
                flags.set(category);
            }
        }
        flags
    }

    fn set(&mut self, category: ExcipientCategory) {
        match category {
            ExcipientCategory::ReducingSugar => self.is_reducing_sugar = true,
            ExcipientCategory::SugarAlcohol => self.is_sugar_alcohol = true,
            ExcipientCategory::Polymer => self.is_polymer = true,
            ExcipientCategory::InorganicSalt => self.is_inorganic_salt = true,
            ExcipientCategory::Filler => self.is_filler = true,
            ExcipientCategory::Lubricant => self.is_lubricant = true,
            ExcipientCategory::Disintegrant => self.is_disintegrant = true,
        }
    }

    /// Flag values in frozen feature-vector order.
    pub fn as_feature_values(&self) -> [f64; 7] {
        [
            self.is_reducing_sugar,
            self.is_sugar_alcohol,
            self.is_polymer,
            self.is_inorganic_salt,
            self.is_filler,
            self.is_lubricant,
            self.is_disintegrant,
        ]
        .map(|flag| f64::from(u8::from(flag)))
    }

    pub fn any(&self) -> bool {
        self.as_feature_values().iter().any(|value| *value > 0.0)
    }
}

/// Exact-lookup display label for a normalized excipient name.
pub fn category_label(normalized_name: &str) -> &'static str {
    CATEGORY_LABEL_LEXICON
        .iter()
        .find(|(key, _)| *key == normalized_name)
        .map(|(_, label)| *label)
        .unwrap_or(FALLBACK_CATEGORY_LABEL)
}

/// Category flags plus display label for a normalized excipient name.
pub fn classify_excipient(normalized_name: &str) -> (ExcipientFlagSet, &'static str) {
    (
        ExcipientFlagSet::from_normalized_name(normalized_name),
        category_label(normalized_name),
    )
}
