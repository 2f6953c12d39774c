pub mod parameter_store;
pub mod role;

pub use parameter_store::{get_parameter, ParameterStore, SsmParameterStore};
pub use role::{assume_role, RoleAssumer, StsRoleAssumer, TemporaryCredentials};
