//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) describe what the domain needs from storage.
//! Driving ports (`*Command`, `*Query`) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod accomodation_repository;
mod accomodations_command;
mod accomodations_query;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use accomodation_repository::MockAccomodationRepository;
pub use accomodation_repository::{AccomodationPersistenceError, AccomodationRepository};
#[cfg(test)]
pub use accomodations_command::MockAccomodationsCommand;
pub use accomodations_command::AccomodationsCommand;
#[cfg(test)]
pub use accomodations_query::MockAccomodationsQuery;
pub use accomodations_query::AccomodationsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
