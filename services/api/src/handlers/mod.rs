pub mod animal;
pub mod farmer;
pub mod user;
pub mod vet;
