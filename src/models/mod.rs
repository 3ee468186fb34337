//! Domain records and the DTOs used by the HTTP layer
//!
//! `noticia` holds the stored record and the values passed to the record store;
//! `requests`/`responses` hold the wire shapes.

pub mod noticia;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use noticia::{ListQuery, NewNoticia, Noticia, NoticiaChanges, NoticiaPage};
pub use requests::{CreateNoticiaRequest, PaginationQuery, UpdateNoticiaRequest};
pub use responses::HealthResponse;
