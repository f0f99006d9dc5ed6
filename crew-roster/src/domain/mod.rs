pub mod models;
pub mod roster_store;
pub mod team_roster_store;
pub mod assignment;
pub mod conflict;
pub mod reconcile;
