//! The emitter family.
//!
//! Every per-entity emitter implements [`Emitter`]: a stateless transform
//! from a resolved entity to one artifact's text. Emitters never mutate the
//! model or the resolution, and never depend on another emitter having run.
//! The two cross-entity manifests live in [`manifest`] and run once per
//! full generation.

pub mod client;
pub mod controller;
pub mod manifest;
pub mod pages;
pub mod persistence;
pub mod util;

#[cfg(test)]
pub(crate) mod testutil;

use crate::{
    config::GenerateConfig,
    resolve::{Resolution, ReverseAssociation},
};
use derive_more::Display;
use entforge_schema::{
    node::{EntityDef, RelationDef},
    set::EntitySet,
};
use std::path::PathBuf;

pub use client::{ClientApiEmitter, ClientSchemaEmitter, ClientTypesEmitter};
pub use controller::ControllerEmitter;
pub use pages::{DetailPageEmitter, FormPageEmitter, ListPageEmitter};
pub use persistence::PersistenceEmitter;

/// Header stamped on generated server-side files.
pub const CS_HEADER: &str = "// <auto-generated>\n//     Generated by entforge. Do not edit; changes are overwritten on the\n//     next generation run.\n// </auto-generated>\n";

/// Header stamped on generated client files.
pub const TS_HEADER: &str = "// @generated by entforge — do not edit manually.\n";

///
/// ArtifactKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ArtifactKind {
    #[display("persistence object")]
    Persistence,

    #[display("api controller")]
    Controller,

    #[display("client types")]
    ClientTypes,

    #[display("client schema")]
    ClientSchema,

    #[display("client api")]
    ClientApi,

    #[display("list page")]
    ListPage,

    #[display("form page")]
    FormPage,

    #[display("detail page")]
    DetailPage,

    #[display("navigation manifest")]
    Navigation,

    #[display("route manifest")]
    Routes,
}

///
/// EmitContext
///
/// Everything one emitter may read: the entity, its synthesized reverse
/// associations, the frozen resolution, the full index, and the run config.
///

pub struct EmitContext<'a> {
    pub entity: &'a EntityDef,
    pub reverses: &'a [ReverseAssociation],
    pub resolution: &'a Resolution,
    pub set: &'a EntitySet,
    pub config: &'a GenerateConfig,
}

impl<'a> EmitContext<'a> {
    #[must_use]
    pub fn new(
        entity: &'a EntityDef,
        resolution: &'a Resolution,
        set: &'a EntitySet,
        config: &'a GenerateConfig,
    ) -> Self {
        Self {
            entity,
            reverses: resolution.reverses_for(&entity.entity),
            resolution,
            set,
            config,
        }
    }

    /// Effective association identifier for one of this entity's explicit
    /// relations, override applied.
    #[must_use]
    pub fn association_for(&self, relation: &RelationDef) -> String {
        self.resolution.association_for(self.entity, relation)
    }

    /// True when the relation's target resolves in the working set.
    #[must_use]
    pub fn target_known(&self, relation: &RelationDef) -> bool {
        self.set.contains(&relation.target)
    }
}

///
/// Emitter
///

pub trait Emitter {
    fn kind(&self) -> ArtifactKind;

    /// Deterministic output path, or `None` when the artifact's output group
    /// is not configured for this run.
    fn path(&self, entity: &EntityDef, config: &GenerateConfig) -> Option<PathBuf>;

    fn emit(&self, ctx: &EmitContext<'_>) -> String;
}

/// The per-entity emitter family for one run, in fixed emission order.
#[must_use]
pub fn emitters(config: &GenerateConfig) -> Vec<Box<dyn Emitter>> {
    let mut family: Vec<Box<dyn Emitter>> = vec![Box::new(PersistenceEmitter)];

    if config.controllers_out.is_some() {
        family.push(Box::new(ControllerEmitter));
    }

    if config.web_out.is_some() {
        family.push(Box::new(ClientTypesEmitter));
        family.push(Box::new(ClientSchemaEmitter));
        family.push(Box::new(ClientApiEmitter));
        family.push(Box::new(ListPageEmitter));
        family.push(Box::new(FormPageEmitter));
        family.push(Box::new(DetailPageEmitter));
    }

    family
}
