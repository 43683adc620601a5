//! Steps of the SmartPayMap wizard outside of field mapping.
//!
//! - [`upload`]: local file checks and the multipart upload
//! - [`preview`]: reading a CSV locally before it is sent anywhere
//! - [`policy`]: the policy simulation form and its result
//! - [`export`]: requesting the standardized file and saving it
//! - [`wizard`]: the linear step machine tying them together

#![deny(unsafe_code)]

pub mod export;
pub mod files;
pub mod policy;
pub mod preview;
pub mod upload;
pub mod wizard;

pub use export::{ExportStep, save_to};
pub use files::{MAX_UPLOAD_SIZE, check_csv_file, validate_encoding};
pub use policy::{PolicyForm, PolicyPanel};
pub use preview::{CsvPreview, read_preview};
pub use upload::{UploadStep, upload_file};
pub use wizard::{Wizard, WizardStep};
