use std::convert::TryFrom;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use csv::WriterBuilder;
use log::{debug, info};
use rand::Rng;
use tempfile::NamedTempFile;

use crate::catalog::{archetype_for, Archetype};
use crate::error::FixtureError;
use crate::product::{
    to_export_json, Metafields, PriceRange, ProductRow, HEADERS, TIMESTAMP_FORMAT,
};

pub const DEFAULT_ROW_COUNT: usize = 2000;

/// Number of data rows to generate. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RowCount(usize);

impl TryFrom<i64> for RowCount {
    type Error = FixtureError;
    fn try_from(count: i64) -> Result<Self, Self::Error> {
        usize::try_from(count)
            .map(RowCount)
            .map_err(|_| FixtureError::InvalidRowCount(count))
    }
}

impl From<usize> for RowCount {
    fn from(count: usize) -> Self {
        RowCount(count)
    }
}

impl Default for RowCount {
    fn default() -> Self {
        RowCount(DEFAULT_ROW_COUNT)
    }
}

impl RowCount {
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Permissions for the finished fixture: those of the file being replaced, otherwise `0644`.
fn fixture_permissions(path: &Path) -> io::Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(default_permissions()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Groups of 9, 4, 4, 4 and 12 decimal digits, shaped like a UUID.
fn random_raw_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        rng.gen_range(100_000_000..=999_999_999_u32),
        rng.gen_range(1000..=9999_u16),
        rng.gen_range(1000..=9999_u16),
        rng.gen_range(1000..=9999_u16),
        rng.gen_range(100_000_000_000..=999_999_999_999_u64),
    )
}

/// Builds the `index`th row from `template` without touching it.
///
/// Created is 1 to 365 days before `now`, updated is 0 to 30 days after created and
/// published equals created.
///
/// # Errors
/// Errors when an embedded JSON document cannot be serialized
pub fn build_row<R: Rng + ?Sized>(
    template: &ProductRow,
    archetype: &Archetype,
    index: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<ProductRow, FixtureError> {
    let product_id = rng.gen_range(8_000_000_000_000..=9_000_000_000_000_u64);

    let price_range = to_export_json(&rng.gen::<PriceRange>())?;
    let metafields = to_export_json(&rng.gen::<Metafields>())?;

    let created_at = now - Duration::days(rng.gen_range(1..=365));
    let updated_at = created_at + Duration::days(rng.gen_range(0..=30));

    Ok(ProductRow {
        airbyte_raw_id: random_raw_id(rng),
        id: product_id.to_string(),
        legacy_resource_id: product_id.to_string(),
        admin_graphql_api_id: format!("gid://shopify/Product/{}", product_id),
        title: archetype.variant_title(index),
        vendor: archetype.vendor.to_string(),
        product_type: archetype.product_type.to_string(),
        tags: archetype.tags.to_string(),
        handle: archetype.handle(index),
        total_inventory: rng.gen_range(0..=500),
        price_range_v2: price_range.clone(),
        price_range,
        created_at: format_timestamp(&created_at),
        updated_at: format_timestamp(&updated_at),
        published_at: format_timestamp(&created_at),
        status: rng.gen(),
        metafields,
        ..template.clone()
    })
}

/// Writes product fixtures derived from an immutable template.
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    template: ProductRow,
    now: DateTime<Utc>,
}

impl Default for FixtureGenerator {
    fn default() -> Self {
        FixtureGenerator::new(Utc::now())
    }
}

impl FixtureGenerator {
    /// Timestamps of generated rows are placed relative to `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        FixtureGenerator::with_template(ProductRow::template(), now)
    }

    #[must_use]
    pub fn with_template(template: ProductRow, now: DateTime<Utc>) -> Self {
        FixtureGenerator { template, now }
    }

    #[must_use]
    pub fn template(&self) -> &ProductRow {
        &self.template
    }

    /// # Errors
    /// See [`build_row`]
    pub fn build_row<R: Rng + ?Sized>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Result<ProductRow, FixtureError> {
        build_row(&self.template, archetype_for(index), index, self.now, rng)
    }

    /// Writes the header and `row_count` rows to `writer`, one row at a time.
    /// Returns the number of data rows written.
    ///
    /// # Errors
    /// Errors when a row cannot be built or the underlying writer fails
    pub fn write_csv<W: io::Write, R: Rng + ?Sized>(
        &self,
        writer: W,
        row_count: RowCount,
        rng: &mut R,
    ) -> Result<usize, FixtureError> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
        writer.write_record(&HEADERS)?;

        for index in 0..row_count.get() {
            writer.serialize(self.build_row(index, rng)?)?;
        }
        writer.flush()?;

        Ok(row_count.get())
    }

    /// Generates the fixture at `path`, replacing any previous file.
    ///
    /// Rows go to a temporary file next to `path` that is renamed over it once complete, so a
    /// failed run leaves no partial fixture behind. The fixture keeps the permissions of the file
    /// it replaces, or gets `0644` when new.
    ///
    /// # Errors
    /// Errors when the destination directory is missing or not writable, or when writing fails
    pub fn generate<P: AsRef<Path>, R: Rng + ?Sized>(
        &self,
        path: P,
        row_count: RowCount,
        rng: &mut R,
    ) -> Result<usize, FixtureError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        info!("Generating {} rows for {}", row_count.get(), path.display());
        let start = Instant::now();
        let mut file = NamedTempFile::new_in(dir)?;
        debug!("Writing rows to temporary file {}", file.path().display());

        let written = self.write_csv(file.as_file_mut(), row_count, rng)?;
        if let Some(permissions) = fixture_permissions(path)? {
            file.as_file().set_permissions(permissions)?;
        }
        file.persist(path)?;
        debug!("Moved temporary file to {}", path.display());

        info!(
            "Wrote {} rows to {} in {:.2?}",
            written,
            path.display(),
            start.elapsed()
        );
        Ok(written)
    }
}

/// Generates `row_count` rows at `path` using the thread RNG and the current time.
///
/// # Errors
/// See [`FixtureGenerator::generate`]
pub fn generate<P: AsRef<Path>>(path: P, row_count: RowCount) -> Result<usize, FixtureError> {
    FixtureGenerator::default().generate(path, row_count, &mut rand::thread_rng())
}
