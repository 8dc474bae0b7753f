//! Diesel schema for document persistence.
//!
//! Backing DDL:
//!
//! ```sql
//! CREATE TABLE documents (
//!     id UUID PRIMARY KEY,
//!     collection VARCHAR(64) NOT NULL,
//!     body JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! CREATE INDEX idx_documents_collection_created_at
//!     ON documents (collection, created_at DESC);
//! ```

diesel::table! {
    /// Documents across all logical collections.
    documents (id) {
        /// Store-assigned document identifier.
        id -> Uuid,
        /// Logical collection name.
        #[max_length = 64]
        collection -> Varchar,
        /// Document field bag.
        body -> Jsonb,
        /// Server-assigned creation timestamp.
        created_at -> Timestamptz,
    }
}
