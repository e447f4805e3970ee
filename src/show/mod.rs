pub mod ingest;
pub mod mapper;
pub mod record;
