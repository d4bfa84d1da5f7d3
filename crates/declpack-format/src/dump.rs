//! Human-readable module dump for debugging and snapshot tests.

use std::fmt::Write as _;

use crate::module::Module;
use crate::reader::Entry;

/// Generate a human-readable dump of the module.
///
/// Stream entries are listed in order with their byte offset. Abbreviated
/// records show the abbreviation id after the code name.
pub fn dump(module: &Module) -> String {
    let mut out = String::new();

    dump_header(&mut out, module);
    dump_identifiers(&mut out, module);
    dump_decls(&mut out, module);
    dump_stream(&mut out, module);

    out
}

fn dump_header(out: &mut String, module: &Module) {
    let h = module.header();
    writeln!(out, "[header]").unwrap();
    writeln!(out, "decls: {}", h.decl_count).unwrap();
    writeln!(out, "identifiers: {}", h.ident_count).unwrap();
    writeln!(out, "required: {}", h.required_count).unwrap();
}

fn dump_identifiers(out: &mut String, module: &Module) {
    if module.identifiers().next().is_none() {
        return;
    }
    writeln!(out, "\n[identifiers]").unwrap();
    for (id, name) in module.identifiers() {
        writeln!(out, "I{:<3} {name}", id.0).unwrap();
    }
}

fn dump_decls(out: &mut String, module: &Module) {
    if module.decl_count() == 0 {
        return;
    }
    writeln!(out, "\n[decls]").unwrap();
    let required = module.required();
    for (slot, offset) in module.decl_offsets().iter().enumerate() {
        let id = crate::DeclId::from_slot(slot);
        let mark = if required.contains(&id) { "  required" } else { "" };
        writeln!(out, "{:<4} @{offset}{mark}", id.to_string()).unwrap();
    }
}

fn dump_stream(out: &mut String, module: &Module) {
    writeln!(out, "\n[stream]").unwrap();
    for entry in module.entries() {
        match entry {
            Ok(Entry::DefineAbbrev { offset, id, abbrev }) => {
                let ops: Vec<String> = abbrev.field_ops().iter().map(|op| op.to_string()).collect();
                let code = abbrev.code().map_or("?", |c| c.name());
                writeln!(out, "{offset:>6}  DEFINE_ABBREV {id} {code} [{}]", ops.join(" "))
                    .unwrap();
            }
            Ok(Entry::Record(record)) => {
                let fields: Vec<String> = record.fields.iter().map(u64::to_string).collect();
                let abbrev = record.abbrev.map(|id| format!(" {id}")).unwrap_or_default();
                writeln!(
                    out,
                    "{:>6}  {}{abbrev} [{}]",
                    record.offset,
                    record.code.name(),
                    fields.join(" ")
                )
                .unwrap();
            }
            Err(e) => {
                writeln!(out, "  error: {e}").unwrap();
            }
        }
    }
}
