//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps it to
//! `DomainError`.

pub mod agents_sea;
pub mod deliveries_sea;
pub mod packages_sea;
