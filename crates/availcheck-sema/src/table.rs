//! Declaration registry with declaration-time attribute validation.

use std::collections::HashMap;

use availcheck_core::{AvailabilityAttribute, CoreError, DeclKind, Declaration, SourceLoc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnostics::DiagnosticEmitter;

/// Index of a declaration within its [`DeclarationTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeclId(u32);

impl DeclId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Raw attribute text as handed over by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSource<'a> {
    pub text: &'a str,
    /// Location of the first character of `text`.
    pub loc: SourceLoc,
}

/// All declarations of one compilation unit.
#[derive(Debug, Default)]
pub struct DeclarationTable {
    decls: Vec<Declaration>,
    by_name: HashMap<String, DeclId>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and attach `attrs`, reporting every problem as an error.
    ///
    /// A declaration with any bad attribute is stored with no availability at
    /// all, so its uses are never diagnosed.
    pub fn declare<E: DiagnosticEmitter + ?Sized>(
        &mut self,
        name: &str,
        kind: DeclKind,
        loc: SourceLoc,
        attrs: &[AttributeSource<'_>],
        emitter: &mut E,
    ) -> DeclId {
        let mut decl = Declaration::new(name, kind, loc);
        let mut rejected = 0usize;

        for source in attrs {
            let attached = AvailabilityAttribute::parse(source.text, source.loc)
                .and_then(|attr| attr.validate().map(|()| attr))
                .and_then(|attr| decl.add_availability(attr));
            if let Err(err) = attached {
                report(&err, source.loc, emitter);
                rejected += 1;
            }
        }

        if rejected > 0 {
            debug!(
                decl = name,
                rejected,
                "dropping availability of declaration with invalid attributes"
            );
            decl = Declaration::new(name, kind, loc);
        }

        self.insert(decl)
    }

    /// Add an already-validated declaration.
    pub fn insert(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.by_name.entry(decl.name().to_string()).or_insert(id);
        self.decls.push(decl);
        id
    }

    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.index())
    }

    /// First declaration registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<DeclId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

fn report<E: DiagnosticEmitter + ?Sized>(err: &CoreError, fallback: SourceLoc, emitter: &mut E) {
    emitter.emit_error(err.loc().unwrap_or(fallback), err.to_string());
}
