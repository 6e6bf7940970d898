// Library exports for ygob-orthologs
pub mod cluster;
pub mod config;
pub mod ortholog;
pub mod pipeline;
pub mod run_log;
pub mod writer;
