#![forbid(unsafe_code)]

pub mod checks;
pub mod dockerfile;
pub mod engine;
pub mod ports;
pub mod render;
pub mod summary;

pub use engine::{
    analyze_file, analyze_outcomes, analyze_text, collect_suggestions, evaluate, load_source,
    AnalyzeError, AnalyzeRequest, CheckOutcome,
};
pub use ports::{AdapterError, Fs};
pub use summary::{human_size, summarize_layers};

#[cfg(test)]
pub(crate) mod testfs;
