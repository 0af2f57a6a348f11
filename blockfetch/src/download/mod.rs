//! The resumable block-download engine.
//!
//! A resource is split into fixed-size byte ranges ("blocks"), each
//! fetched with its own ranged request. Completed blocks are recorded
//! in a durable ledger so an interrupted run resumes without
//! re-fetching them.
//!
//! # Architecture
//!
//! ```text
//! Engine (orchestrator)
//!     │
//!     ├── probe    - capability probing (HEAD)
//!     ├── plan     - block partitioning
//!     ├── fetch    - per-block ranged GET
//!     ├── ledger   - durable resume record
//!     └── finalize - reassembly and cleanup
//! ```

mod engine;
mod fetch;
mod finalize;
mod ledger;
mod plan;
mod probe;

pub use engine::{DownloadReport, Engine, EngineConfig, DEFAULT_HTTP_PORT};
pub use fetch::fetch_block;
pub use finalize::{assemble, block_file_name};
pub use ledger::{JobDescriptor, ResumeLedger};
pub use plan::{plan_blocks, Block};
pub use probe::{parse_head_response, probe, ResourceInfo};
