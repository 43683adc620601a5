//! Data model shared by the SmartPayMap client crates.
//!
//! Everything here is transient session state or a wire shape exchanged with
//! the mapping backend. Nothing is persisted by the client.

pub mod dataset;
pub mod error;
pub mod export;
pub mod fields;
pub mod health;
pub mod mapping;
pub mod policy;
pub mod risk;

pub use dataset::UploadedDataset;
pub use error::{Result, SpmError};
pub use export::{DEFAULT_EXPORT_FILENAME, ExportRequest, ExportedFile};
pub use fields::{STANDARD_FIELDS, StandardField, is_standard_field};
pub use health::HealthStatus;
pub use mapping::{AnalyzeRequest, AnalyzeResponse, FieldMapping, FinalizeRequest};
pub use policy::{
    COUNTRIES, CURRENCIES, CostAnalysis, Country, PolicyChange, SimulationRequest,
    SimulationResult, find_country,
};
pub use risk::{ComplianceHeatmapResponse, CountryRisk, RiskLevel};

