// src/db/mod.rs
//
// Database layer: connection pooling and schema management

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, default_database_path, get_connection, ConnectionPool, PooledConn,
};
pub use migrations::{initialize_database, verify_database_integrity};
