pub mod ats;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod output;
pub mod scan;
