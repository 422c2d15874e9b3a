use std::io;

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{ser, Deserialize, Serialize};
use serde_json::ser::Formatter;

/// Column titles of the product export, in the order every row is written.
pub const HEADERS: [&str; 46] = [
    "_AIRBYTE_RAW_ID",
    "_AIRBYTE_EXTRACTED_AT",
    "_AIRBYTE_META",
    "_AIRBYTE_GENERATION_ID",
    "ID",
    "SEO",
    "TAGS",
    "IMAGE",
    "TITLE",
    "HANDLE",
    "IMAGES",
    "STATUS",
    "VENDOR",
    "OPTIONS",
    "FEEDBACK",
    "SHOP_URL",
    "VARIANTS",
    "BODY_HTML",
    "CREATED_AT",
    "DELETED_AT",
    "UPDATED_AT",
    "DESCRIPTION",
    "MEDIA_COUNT",
    "IS_GIFT_CARD",
    "PRODUCT_TYPE",
    "PUBLISHED_AT",
    "FEATURED_IMAGE",
    "FEATURED_MEDIA",
    "PRICE_RANGE_V2",
    "TOTAL_VARIANTS",
    "DELETED_MESSAGE",
    "PUBLISHED_SCOPE",
    "TEMPLATE_SUFFIX",
    "TOTAL_INVENTORY",
    "DESCRIPTION_HTML",
    "ONLINE_STORE_URL",
    "TRACKS_INVENTORY",
    "LEGACY_RESOURCE_ID",
    "DELETED_DESCRIPTION",
    "ADMIN_GRAPHQL_API_ID",
    "REQUIRES_SELLIN_PLAN",
    "HAS_ONLY_DEFAULT_VARIANT",
    "ONLINE_STORE_PREVIEW_URL",
    "HAS_OUT_OF_STOCK_VARIANTS",
    "PRICE_RANGE",
    "METAFIELDS",
];

/// Format of every timestamp column. The export carries a literal millisecond and zone suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S.000 Z";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductStatus {
    Active,
    Draft,
    Archived,
}

/// Boolean cells are exported as `TRUE`/`FALSE` literals.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Flag {
    True,
    False,
}

/// One product of the export. Field declaration order is the column order of [`HEADERS`].
///
/// Sub-documents (`SEO`, `OPTIONS`, `PRICE_RANGE`, `METAFIELDS`, ...) are kept as JSON text,
/// which is how the export stores them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ProductRow {
    #[serde(rename = "_AIRBYTE_RAW_ID")]
    pub airbyte_raw_id: String,
    #[serde(rename = "_AIRBYTE_EXTRACTED_AT")]
    pub airbyte_extracted_at: String,
    #[serde(rename = "_AIRBYTE_META")]
    pub airbyte_meta: String,
    #[serde(rename = "_AIRBYTE_GENERATION_ID")]
    pub airbyte_generation_id: String,
    pub id: String,
    pub seo: String,
    pub tags: String,
    pub image: String,
    pub title: String,
    pub handle: String,
    pub images: String,
    pub status: ProductStatus,
    pub vendor: String,
    pub options: String,
    pub feedback: String,
    pub shop_url: String,
    pub variants: String,
    pub body_html: String,
    pub created_at: String,
    pub deleted_at: String,
    pub updated_at: String,
    pub description: String,
    pub media_count: String,
    pub is_gift_card: Flag,
    pub product_type: String,
    pub published_at: String,
    pub featured_image: String,
    pub featured_media: String,
    pub price_range_v2: String,
    pub total_variants: String,
    pub deleted_message: String,
    pub published_scope: String,
    pub template_suffix: String,
    pub total_inventory: u32,
    pub description_html: String,
    pub online_store_url: String,
    pub tracks_inventory: Flag,
    pub legacy_resource_id: String,
    pub deleted_description: String,
    pub admin_graphql_api_id: String,
    pub requires_sellin_plan: Option<Flag>,
    pub has_only_default_variant: Flag,
    pub online_store_preview_url: String,
    pub has_out_of_stock_variants: Flag,
    pub price_range: String,
    pub metafields: String,
}

impl ProductRow {
    /// The baseline record every generated row starts from.
    #[must_use]
    pub fn template() -> Self {
        let price_range = r#"{"max_variant_price": {"amount": 29.99, "currency_code": "USD"}, "min_variant_price": {"amount": 19.99, "currency_code": "USD"}}"#;
        ProductRow {
            airbyte_raw_id: "467b2995-7399-4542-8ea2-632aea4971e6".to_string(),
            airbyte_extracted_at: "2025-03-21 14:13:50.247 Z".to_string(),
            airbyte_meta: r#"{"changes": [], "sync_id": 31326694}"#.to_string(),
            airbyte_generation_id: "0".to_string(),
            id: "8.12162E+12".to_string(),
            seo: r#"{"description": null, "title": "Product Title"}"#.to_string(),
            tags: "Health, Supplements, Organic".to_string(),
            image: String::new(),
            title: "Sample Product".to_string(),
            handle: "sample-product".to_string(),
            images: "[]".to_string(),
            status: ProductStatus::Active,
            vendor: "Sample Vendor".to_string(),
            options: r#"[{"id": 10349395476719, "name": "Title", "position": 1, "product_id": 8121622593775, "values": ["Default Title"]}]"#.to_string(),
            feedback: String::new(),
            shop_url: "how2go".to_string(),
            variants: r#"[{"id": 44084832108783}]"#.to_string(),
            body_html: "<p>Product description here</p>".to_string(),
            created_at: "2023-09-25 15:52:45.000 Z".to_string(),
            deleted_at: String::new(),
            updated_at: "2025-03-21 13:10:43.000 Z".to_string(),
            description: "Product description".to_string(),
            media_count: "1".to_string(),
            is_gift_card: Flag::False,
            product_type: "Supplements".to_string(),
            published_at: "2023-09-25 15:52:45.000 Z".to_string(),
            featured_image: String::new(),
            featured_media: String::new(),
            price_range_v2: price_range.to_string(),
            total_variants: "1".to_string(),
            deleted_message: String::new(),
            published_scope: String::new(),
            template_suffix: String::new(),
            total_inventory: 100,
            description_html: "<p>Product description here</p>".to_string(),
            online_store_url: String::new(),
            tracks_inventory: Flag::True,
            legacy_resource_id: "8.12162E+12".to_string(),
            deleted_description: String::new(),
            admin_graphql_api_id: "gid://shopify/Product/8121622593775".to_string(),
            requires_sellin_plan: None,
            has_only_default_variant: Flag::True,
            online_store_preview_url: "https://example.com/products/preview".to_string(),
            has_out_of_stock_variants: Flag::False,
            price_range: price_range.to_string(),
            metafields: r#"{"health_benefits": {"namespace": "health", "value": "general_wellness"}, "reviews_rating": {"namespace": "reviews", "value": "4.2"}, "reviews_count": {"namespace": "reviews", "value": "150"}}"#.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    /// Serialized as a decimal string, e.g. `"19.99"`
    pub amount: Decimal,
    pub currency_code: Currency,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub max_variant_price: Money,
    pub min_variant_price: Money,
}

impl Money {
    /// `whole` dollars and 99 cents.
    #[must_use]
    pub fn usd_ending_99(whole: u32) -> Self {
        Money {
            amount: Decimal::new(i64::from(whole) * 100 + 99, 2),
            currency_code: Currency::Usd,
        }
    }
}

impl PriceRange {
    #[must_use]
    pub fn usd(min_whole: u32, max_whole: u32) -> Self {
        PriceRange {
            max_variant_price: Money::usd_ending_99(max_whole),
            min_variant_price: Money::usd_ending_99(min_whole),
        }
    }
}

/// Lower bound in [10, 50], upper bound 5 to 30 dollars above it.
impl Distribution<PriceRange> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PriceRange {
        let floor = rng.gen_range(10..=50);
        let spread = rng.gen_range(5..=30);
        PriceRange::usd(floor, floor + spread)
    }
}

impl Distribution<ProductStatus> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ProductStatus {
        match rng.gen_range(0..3) {
            0 => ProductStatus::Active,
            1 => ProductStatus::Draft,
            _ => ProductStatus::Archived,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBenefit {
    ImmuneSupport,
    EnergyBoost,
    DigestiveHealth,
    JointSupport,
}

impl HealthBenefit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HealthBenefit::ImmuneSupport => "immune_support",
            HealthBenefit::EnergyBoost => "energy_boost",
            HealthBenefit::DigestiveHealth => "digestive_health",
            HealthBenefit::JointSupport => "joint_support",
        }
    }
}

impl Distribution<HealthBenefit> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> HealthBenefit {
        match rng.gen_range(0..4) {
            0 => HealthBenefit::ImmuneSupport,
            1 => HealthBenefit::EnergyBoost,
            2 => HealthBenefit::DigestiveHealth,
            _ => HealthBenefit::JointSupport,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryLocation {
    WarehouseA,
    WarehouseB,
    WarehouseC,
}

impl InventoryLocation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InventoryLocation::WarehouseA => "warehouse_a",
            InventoryLocation::WarehouseB => "warehouse_b",
            InventoryLocation::WarehouseC => "warehouse_c",
        }
    }
}

impl Distribution<InventoryLocation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> InventoryLocation {
        match rng.gen_range(0..3) {
            0 => InventoryLocation::WarehouseA,
            1 => InventoryLocation::WarehouseB,
            _ => InventoryLocation::WarehouseC,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Metafield {
    pub namespace: String,
    pub value: String,
}

impl Metafield {
    fn new(namespace: &str, value: impl ToString) -> Self {
        Metafield {
            namespace: namespace.to_string(),
            value: value.to_string(),
        }
    }
}

/// The `METAFIELDS` document. Every value is stored as a string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Metafields {
    pub health_benefits: Metafield,
    pub reviews_rating: Metafield,
    pub reviews_count: Metafield,
    pub inventory_location: Metafield,
    pub shipping_weight: Metafield,
}

/// Trailing zeros are dropped but one decimal place is always kept: `0.1`, `1.25`, `2.0`.
#[must_use]
pub fn shipping_weight(hundredths: i64) -> Decimal {
    let mut weight = Decimal::new(hundredths, 2).normalize();
    if weight.scale() == 0 {
        weight.rescale(1);
    }
    weight
}

/// Rating is drawn in tenths over [3.0, 5.0] and weight in hundredths over [0.1, 2.0].
impl Distribution<Metafields> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Metafields {
        let benefit: HealthBenefit = rng.gen();
        let rating = Decimal::new(rng.gen_range(30..=50), 1);
        let review_count: u32 = rng.gen_range(10..=1000);
        let location: InventoryLocation = rng.gen();
        let weight = shipping_weight(rng.gen_range(10..=200));
        Metafields {
            health_benefits: Metafield::new("health", benefit.as_str()),
            reviews_rating: Metafield::new("reviews", rating),
            reviews_count: Metafield::new("reviews", review_count),
            inventory_location: Metafield::new("inventory", location.as_str()),
            shipping_weight: Metafield::new("shipping", weight),
        }
    }
}

/// Writes JSON with a space after every `:` and `,`, the way the export's documents are spaced.
struct ExportFormatter;

impl Formatter for ExportFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serializes an embedded document as it appears in the export, e.g. `{"a": 1, "b": [1, 2]}`.
///
/// # Errors
/// Errors when `value` cannot be represented as JSON
pub fn to_export_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, ExportFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(<serde_json::Error as ser::Error>::custom)
}
