//! Dataset specifications.
//!
//! Each dataset is a static record: a name, a source URL, the local archive
//! filename, and the archive family used for extraction dispatch.

use crate::url_model::archive_name_from_url;

/// Archive family of a dataset, for listings and reports. Extraction
/// dispatches on the archive filename suffix, not on this field, so a
/// mislabeled kind cannot send a zip through the tar path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// PKZIP container (`.zip`).
    Zip,
    /// Tar container, plain or compressed with gzip/xz (`.tar`, `.tar.gz`, `.tgz`, `.tar.xz`).
    TarFamily,
}

impl ArchiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::TarFamily => "tar",
        }
    }
}

/// One dataset to fetch: where it lives and what to call the archive locally.
#[derive(Debug, Clone)]
pub struct DatasetSpec {
    /// Short name; also the per-dataset directory name under the data dir.
    pub name: String,
    /// Direct download URL.
    pub url: String,
    /// Local archive filename within the dataset directory.
    pub archive: String,
    /// Archive family (informational; see [`ArchiveKind`]).
    pub kind: ArchiveKind,
}

impl DatasetSpec {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        archive: impl Into<String>,
        kind: ArchiveKind,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            archive: archive.into(),
            kind,
        }
    }

    /// Builds a spec whose archive filename is derived from the URL path.
    pub fn from_url(name: impl Into<String>, url: impl Into<String>, kind: ArchiveKind) -> Self {
        let url = url.into();
        let archive = archive_name_from_url(&url);
        Self {
            name: name.into(),
            url,
            archive,
            kind,
        }
    }
}

/// The datasets cvget ships with: parking occupancy imagery (PKLot,
/// CNRPark-EXT) and license-plate benchmarks (CCPD via the Zenodo mirror,
/// OpenALPR).
pub fn builtin_datasets() -> Vec<DatasetSpec> {
    vec![
        DatasetSpec::from_url(
            "pklot",
            "https://www.inf.ufpr.br/vri/databases/PKLot.tar.gz",
            ArchiveKind::TarFamily,
        ),
        DatasetSpec::from_url(
            "cnrpark",
            "https://aimagelab.ing.unimore.it/files/CNRPark-EXT/CNRPark-EXT.zip",
            ArchiveKind::Zip,
        ),
        // Zenodo mirror; the upstream GitHub links are unreliable.
        DatasetSpec::from_url(
            "ccpd",
            "https://zenodo.org/records/15647076/files/CCPD2019.tar.xz?download=1",
            ArchiveKind::TarFamily,
        ),
        // GitHub names the branch archive "master.zip"; keep a clearer local name.
        DatasetSpec::new(
            "openalpr",
            "https://github.com/openalpr/benchmarks/archive/refs/heads/master.zip",
            "openalpr.zip",
            ArchiveKind::Zip,
        ),
    ]
}
