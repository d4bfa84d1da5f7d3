//! Eager-load policy.
//!
//! Declarations with effects visible outside the translation unit (emitted
//! definitions, static initializers, file-scope asm) must be handed to the
//! consumer even if nothing looks them up by name.

use declpack_core::{
    AttrKind, DeclArena, DeclIdx, DeclKind, LangOptions, LinkageLanguage, StorageClass, VarDecl,
};

/// Whether a reader must load `idx` as soon as the module is opened.
pub fn is_required(arena: &DeclArena, idx: DeclIdx, lang: &LangOptions) -> bool {
    let decl = arena.get(idx);

    if let DeclKind::FileScopeAsm(_) = decl.kind {
        return true;
    }

    match &decl.kind {
        DeclKind::Var(_) if is_file_var(arena, idx) => {}
        kind if kind.as_function().is_some() => {}
        _ => return false,
    }

    if decl.has_attr(|a| matches!(a, AttrKind::Alias { .. } | AttrKind::Used)) {
        return true;
    }

    if let Some(function) = decl.kind.as_function() {
        if !function.is_definition() {
            return false;
        }
        if decl.has_attr(|a| {
            matches!(a, AttrKind::Constructor { .. } | AttrKind::Destructor { .. })
        }) {
            return true;
        }
        return function.storage_class != StorageClass::Static;
    }

    let DeclKind::Var(var) = &decl.kind else {
        return false;
    };
    if var.init.is_none() {
        if !lang.cplusplus {
            return false;
        }
        if var.storage_class == StorageClass::Extern || has_c_linkage(arena, idx, var) {
            return false;
        }
    }
    var.storage_class != StorageClass::Static
}

/// A `Var` at namespace scope (looking through linkage specs) or a static
/// data member of a record.
pub fn is_file_var(arena: &DeclArena, idx: DeclIdx) -> bool {
    let decl = arena.get(idx);
    if !matches!(decl.kind, DeclKind::Var(_)) {
        return false;
    }
    let Some(dc) = decl.semantic_dc else {
        return false;
    };
    let kind = &arena.get(arena.lookup_context(dc)).kind;
    kind.is_file_context() || kind.is_record()
}

/// Whether a C++ variable is declared inside an `extern "C"` block.
///
/// Only the innermost linkage spec counts; a function-like scope in between
/// gives the variable no linkage at all.
fn has_c_linkage(arena: &DeclArena, idx: DeclIdx, var: &VarDecl) -> bool {
    let mut dc = arena.get(idx).semantic_dc;
    while let Some(current) = dc {
        let kind = &arena.get(current).kind;
        match kind {
            DeclKind::TranslationUnit(_) => return false,
            DeclKind::LinkageSpec(spec) => {
                return spec.language == LinkageLanguage::C
                    && var.storage_class != StorageClass::Static;
            }
            _ if kind.is_function_or_method() => return false,
            _ => dc = arena.get(current).semantic_dc,
        }
    }
    false
}
