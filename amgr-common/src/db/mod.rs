//! Entity store access: schema bootstrap, repository operations and
//! dashboard aggregation

pub mod albums;
pub mod artists;
pub mod concerts;
pub mod contracts;
pub mod dashboard;
pub mod init;

pub use albums::{Album, AlbumForm, NewAlbum};
pub use artists::{Artist, ArtistForm, NewArtist};
pub use concerts::{Concert, ConcertForm, NewConcert};
pub use contracts::{Contract, ContractForm, NewContract};
pub use dashboard::{ActivityLogEntry, DashboardStats, EntityCounts, GenreCount, TopArtist};
pub use init::{connect_options, create_schema, init_database};
