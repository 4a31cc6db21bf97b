pub mod analysis_worker;
