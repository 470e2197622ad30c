use crate::prelude::*;

///
/// RuleDef
///
/// Business-rule trigger point. The generator only wires the hook; the
/// script body is hand-written next to the generated persistence object.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RuleDef {
    /// Trigger name, e.g. `BeforeSave` or `AfterSave`.
    pub trigger: String,

    /// Name of the hand-written hook the trigger dispatches to.
    pub script: String,
}
