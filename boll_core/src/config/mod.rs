pub mod boll_config;
