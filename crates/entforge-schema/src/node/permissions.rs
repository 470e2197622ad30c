use crate::prelude::*;

///
/// PermissionsDef
///
/// CRUD role defaults consumed by the controller emitter. Deletion is locked
/// to administrators unless the definition says otherwise.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PermissionsDef {
    #[serde(default = "default_role")]
    pub read: String,

    #[serde(default = "default_role")]
    pub create: String,

    #[serde(default = "default_role")]
    pub update: String,

    #[serde(default = "default_delete_role")]
    pub delete: String,
}

impl Default for PermissionsDef {
    fn default() -> Self {
        Self {
            read: default_role(),
            create: default_role(),
            update: default_role(),
            delete: default_delete_role(),
        }
    }
}

fn default_role() -> String {
    "Default".to_owned()
}

fn default_delete_role() -> String {
    "Administrators".to_owned()
}
