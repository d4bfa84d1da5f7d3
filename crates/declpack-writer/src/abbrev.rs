//! Abbreviation catalog.
//!
//! Compact shapes for the most common declaration forms. Each shape comes
//! with an eligibility predicate over the declaration; a declaration that
//! passes the predicate produces fields that match every literal in the
//! shape. The stream rejects a record that does not.

use declpack_core::{AccessSpecifier, Decl, DeclKind, DeclName, StorageClass};
use declpack_format::{Abbrev, AbbrevId, RecordCode, RecordStream};

/// Abbreviations registered for one session.
#[derive(Debug, Default)]
pub struct AbbrevCatalog {
    parm_var: Option<AbbrevId>,
    field: Option<AbbrevId>,
    typedef: Option<AbbrevId>,
}

impl AbbrevCatalog {
    /// Define every shape in `stream`. Must run before the first declaration.
    pub fn register(stream: &mut RecordStream) -> Self {
        Self {
            parm_var: Some(stream.define_abbrev(parm_var_abbrev())),
            field: Some(stream.define_abbrev(field_abbrev())),
            typedef: Some(stream.define_abbrev(typedef_abbrev())),
        }
    }

    /// Catalog that never selects a shape.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Shape to use for `decl`, if any.
    pub fn select(&self, decl: &Decl) -> Option<AbbrevId> {
        match decl.kind {
            DeclKind::ParmVar(_) if is_plain_parm_var(decl) => self.parm_var,
            DeclKind::Field(_) if is_plain_field(decl) => self.field,
            DeclKind::Typedef(_) if is_plain_typedef(decl) => self.typedef,
            _ => None,
        }
    }
}

/// Decl level with default common attributes, then an identifier name.
fn plain_named_prefix(code: RecordCode) -> Abbrev {
    Abbrev::for_code(code)
        .varints(3) // semantic dc, lexical dc, location
        .literal(0) // invalid
        .literal(0) // has attrs
        .literal(0) // implicit
        .literal(0) // used
        .literal(AccessSpecifier::None as u64)
        .literal(0) // level
        .literal(0) // name kind: identifier
        .varint() // identifier id
}

pub(crate) fn parm_var_abbrev() -> Abbrev {
    plain_named_prefix(RecordCode::DeclParmVar)
        .varint() // type
        .literal(0) // type source info
        .literal(StorageClass::None as u64)
        .literal(StorageClass::None as u64) // as written
        .literal(0) // thread specified
        .literal(0) // direct initializer
        .literal(0) // declared in condition
        .literal(0) // exception variable
        .literal(0) // nrvo
        .literal(0) // previous
        .literal(0) // has default argument
        .literal(0) // objc qualifier
        .literal(0) // inherited default argument
}

pub(crate) fn field_abbrev() -> Abbrev {
    plain_named_prefix(RecordCode::DeclField)
        .varint() // type
        .literal(0) // type source info
        .literal(0) // mutable
        .literal(0) // has bit width
}

pub(crate) fn typedef_abbrev() -> Abbrev {
    plain_named_prefix(RecordCode::DeclTypedef)
        .varint() // declared type
        .varint() // type source info
}

fn has_plain_common_attrs(decl: &Decl) -> bool {
    !decl.invalid
        && !decl.has_attrs()
        && !decl.implicit
        && !decl.used
        && decl.access == AccessSpecifier::None
        && decl.level == 0
        && matches!(decl.name(), Some(DeclName::Identifier(_)))
}

pub(crate) fn is_plain_parm_var(decl: &Decl) -> bool {
    let DeclKind::ParmVar(parm) = &decl.kind else {
        return false;
    };
    let var = &parm.var;
    has_plain_common_attrs(decl)
        && var.storage_class == StorageClass::None
        && var.storage_class_as_written == StorageClass::None
        && !var.thread_specified
        && !var.direct_initializer
        && !var.declared_in_condition
        && !var.exception_variable
        && !var.nrvo_variable
        && var.declarator.type_info.is_none()
        && var.previous.is_none()
        && var.init.is_none()
        && parm.objc_qualifier == 0
        && !parm.inherited_default_arg
}

pub(crate) fn is_plain_field(decl: &Decl) -> bool {
    let DeclKind::Field(field) = &decl.kind else {
        return false;
    };
    has_plain_common_attrs(decl)
        && field.declarator.type_info.is_none()
        && !field.mutable
        && field.bit_width.is_none()
}

pub(crate) fn is_plain_typedef(decl: &Decl) -> bool {
    matches!(decl.kind, DeclKind::Typedef(_)) && has_plain_common_attrs(decl)
}
