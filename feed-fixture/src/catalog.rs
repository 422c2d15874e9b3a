/// A product descriptor that generated rows borrow their title, vendor, type and tags from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Archetype {
    pub title: &'static str,
    pub vendor: &'static str,
    pub product_type: &'static str,
    pub tags: &'static str,
}

pub const CATALOG: [Archetype; 10] = [
    Archetype {
        title: "Vitamin D3 5000 IU",
        vendor: "NatureWise",
        product_type: "Vitamins",
        tags: "Health, Vitamins, Immune Support",
    },
    Archetype {
        title: "Organic Green Tea Extract",
        vendor: "Garden of Life",
        product_type: "Supplements",
        tags: "Organic, Antioxidants, Weight Loss",
    },
    Archetype {
        title: "Omega-3 Fish Oil",
        vendor: "Nordic Naturals",
        product_type: "Fish Oil",
        tags: "Heart Health, Brain Health, Omega-3",
    },
    Archetype {
        title: "Probiotics 50 Billion CFU",
        vendor: "Renew Life",
        product_type: "Probiotics",
        tags: "Digestive Health, Gut Health, Probiotics",
    },
    Archetype {
        title: "Magnesium Glycinate",
        vendor: "Thorne",
        product_type: "Minerals",
        tags: "Sleep Support, Muscle Health, Magnesium",
    },
    Archetype {
        title: "Turmeric Curcumin",
        vendor: "Life Extension",
        product_type: "Herbs",
        tags: "Anti-inflammatory, Joint Health, Turmeric",
    },
    Archetype {
        title: "B-Complex Vitamins",
        vendor: "Jarrow Formulas",
        product_type: "Vitamins",
        tags: "Energy Support, B Vitamins, Metabolism",
    },
    Archetype {
        title: "Ashwagandha Root Extract",
        vendor: "Gaia Herbs",
        product_type: "Herbs",
        tags: "Stress Relief, Adaptogen, Ashwagandha",
    },
    Archetype {
        title: "Collagen Peptides",
        vendor: "Vital Proteins",
        product_type: "Protein",
        tags: "Skin Health, Joint Health, Collagen",
    },
    Archetype {
        title: "Zinc Picolinate",
        vendor: "NOW Foods",
        product_type: "Minerals",
        tags: "Immune Support, Zinc, Mineral",
    },
];

/// Round-robin selection over [`CATALOG`].
#[must_use]
pub fn archetype_for(index: usize) -> &'static Archetype {
    &CATALOG[index % CATALOG.len()]
}

impl Archetype {
    /// Title of the `index`th generated row, numbered from 1.
    #[must_use]
    pub fn variant_title(&self, index: usize) -> String {
        format!("{} - Variant {}", self.title, index + 1)
    }

    #[must_use]
    pub fn handle(&self, index: usize) -> String {
        format!("{}-{}", self.title.to_lowercase().replace(' ', "-"), index + 1)
    }
}
