pub mod admin_service;
pub mod catalog_service;
pub mod cleanup;
pub mod storage;
pub mod thumbnail_service;
