//! Declaration visitor.
//!
//! Turns one declaration into a record code plus an ordered field list. Each
//! hierarchy level writes only the fields it introduces, after its parent
//! level has written its own, so a reader can undo the walk level by level.
//!
//! References to other declarations are resolved to IDs (minting as needed)
//! but never written from here; expression trees are queued and written by
//! the session after the record closes.

use declpack_core::{
    AccessSpecifier, ApsInt, BlockDecl, ClassTemplateDecl, CxxRecordDecl, CxxRecordTemplate, Decl,
    DeclIdx, DeclKind, DeclName, DeclaratorDecl, EnumConstantDecl, EnumDecl, FieldDecl,
    FunctionDecl, FunctionTemplateDecl, FunctionTemplateKind, Interner, LocatedRef, NamedDecl,
    NamespaceAliasDecl, NamespaceDecl, NestedNamePart, NestedNameSpecifier, ObjcCategoryDecl,
    ObjcContainerDecl, ObjcImplDecl, ObjcInterfaceDecl, ObjcMethodDecl, ObjcPropertyDecl,
    ObjcProtocolDecl, ParmVarDecl, RecordDecl, SourceLocation, SourceRange, StmtHandle, Symbol,
    TagDecl, TemplateArgument, TemplateArgumentLoc, TemplateArgumentLocInfo, TemplateDecl,
    TemplateTypeParmDecl, TypeDecl, TypeHandle, TypeSourceInfo, TypedefDecl,
    UnresolvedUsingTypenameDecl, UnresolvedUsingValueDecl, UsingDecl, UsingDirectiveDecl,
    UsingShadowDecl, ValueDecl, VarDecl,
};
use declpack_format::RecordCode;

use crate::WriteError;
use crate::collab::TypeResolver;
use crate::ident_table::IdentifierTable;
use crate::registry::IdentityRegistry;
use crate::stmt_queue::StmtQueue;

type Result<T = ()> = std::result::Result<T, WriteError>;

/// Record under construction for one declaration.
pub(crate) struct DeclVisitor<'v> {
    interner: &'v Interner,
    types: &'v mut dyn TypeResolver,
    registry: &'v mut IdentityRegistry,
    idents: &'v mut IdentifierTable,
    queue: &'v mut StmtQueue,
    code: Option<RecordCode>,
    fields: Vec<u64>,
}

impl<'v> DeclVisitor<'v> {
    pub(crate) fn new(
        interner: &'v Interner,
        types: &'v mut dyn TypeResolver,
        registry: &'v mut IdentityRegistry,
        idents: &'v mut IdentifierTable,
        queue: &'v mut StmtQueue,
    ) -> Self {
        Self {
            interner,
            types,
            registry,
            idents,
            queue,
            code: None,
            fields: Vec::new(),
        }
    }

    pub(crate) fn into_parts(self) -> (Option<RecordCode>, Vec<u64>) {
        (self.code, self.fields)
    }

    // ------------------------------------------------------------------
    // Field encoding
    // ------------------------------------------------------------------

    #[inline]
    pub(crate) fn push(&mut self, value: u64) {
        self.fields.push(value);
    }

    #[inline]
    fn push_bool(&mut self, value: bool) {
        self.fields.push(u64::from(value));
    }

    pub(crate) fn push_decl(&mut self, decl: Option<DeclIdx>) {
        let id = self.registry.resolve_opt(decl);
        self.fields.push(u64::from(id.0));
    }

    /// Count, then one ID per declaration.
    fn push_decls(&mut self, decls: &[DeclIdx]) {
        self.push(decls.len() as u64);
        for &decl in decls {
            self.push_decl(Some(decl));
        }
    }

    /// Count, then the IDs, then the locations in the same order.
    fn push_located_refs(&mut self, refs: &[LocatedRef]) {
        self.push(refs.len() as u64);
        for r in refs {
            self.push_decl(Some(r.decl));
        }
        for r in refs {
            self.push_loc(r.loc);
        }
    }

    fn push_type(&mut self, ty: Option<TypeHandle>) {
        let id = ty.map_or(0, |ty| self.types.type_id(ty).0);
        self.fields.push(u64::from(id));
    }

    fn push_type_info(&mut self, info: Option<TypeSourceInfo>) {
        self.push_type(info.map(|i| i.ty));
    }

    #[inline]
    fn push_loc(&mut self, loc: SourceLocation) {
        self.fields.push(u64::from(loc.raw()));
    }

    fn push_range(&mut self, range: SourceRange) {
        self.push_loc(range.begin);
        self.push_loc(range.end);
    }

    fn push_ident(&mut self, sym: Option<Symbol>) -> Result {
        let id = self.idents.get_or_intern_opt(sym, self.interner)?;
        self.fields.push(u64::from(id.0));
        Ok(())
    }

    /// Name-kind tag, then the payload for that kind.
    pub(crate) fn push_name(&mut self, name: &DeclName) -> Result {
        self.push(name.kind_tag());
        match *name {
            DeclName::Identifier(sym) => self.push_ident(sym)?,
            DeclName::ObjcSelector { first, arity } => {
                self.push_ident(first)?;
                self.push(u64::from(arity));
            }
            DeclName::Constructor(ty) | DeclName::Destructor(ty) | DeclName::Conversion(ty) => {
                self.push_type(Some(ty))
            }
            DeclName::Operator(op) => self.push(u64::from(op)),
            DeclName::LiteralOperator(sym) => self.push_ident(Some(sym))?,
            DeclName::UsingDirective => {}
        }
        Ok(())
    }

    /// Part count, then a kind tag and payload per part.
    fn push_qualifier(&mut self, qualifier: Option<&NestedNameSpecifier>) -> Result {
        let parts = qualifier.map_or(&[][..], |q| q.parts.as_slice());
        self.push(parts.len() as u64);
        for part in parts {
            self.push(part.kind_tag());
            match *part {
                NestedNamePart::Identifier(sym) => self.push_ident(Some(sym))?,
                NestedNamePart::Namespace(ns) => self.push_decl(Some(ns)),
                NestedNamePart::TypeSpec(ty) | NestedNamePart::TypeSpecWithTemplate(ty) => {
                    self.push_type(Some(ty))
                }
                NestedNamePart::Global => {}
            }
        }
        Ok(())
    }

    fn push_aps_int(&mut self, value: &ApsInt) {
        self.push_bool(value.is_unsigned);
        self.push(u64::from(value.bit_width));
        self.push(value.num_words() as u64);
        self.fields.extend_from_slice(&value.words);
    }

    fn push_template_arg(&mut self, arg: &TemplateArgument) {
        self.push(arg.kind_tag());
        match arg {
            TemplateArgument::Null => {}
            TemplateArgument::Type(ty) => self.push_type(Some(*ty)),
            TemplateArgument::Declaration(decl) | TemplateArgument::Template(decl) => {
                self.push_decl(Some(*decl))
            }
            TemplateArgument::Integral { value, ty } => {
                self.push_aps_int(value);
                self.push_type(Some(*ty));
            }
            TemplateArgument::Expression(expr) => self.queue(*expr),
            TemplateArgument::Pack(args) => {
                self.push(args.len() as u64);
                for arg in args {
                    self.push_template_arg(arg);
                }
            }
        }
    }

    fn push_template_arg_loc(&mut self, arg: &TemplateArgumentLoc) {
        self.push_template_arg(&arg.argument);
        match arg.info {
            TemplateArgumentLocInfo::None => {}
            TemplateArgumentLocInfo::Expression(expr) => self.queue(expr),
            TemplateArgumentLocInfo::TypeSourceInfo(info) => self.push_type_info(info),
            TemplateArgumentLocInfo::Template {
                qualifier_range,
                name_loc,
            } => {
                self.push_range(qualifier_range);
                self.push_loc(name_loc);
            }
        }
    }

    #[inline]
    fn queue(&mut self, stmt: StmtHandle) {
        self.queue.push(stmt);
    }

    #[inline]
    fn set_code(&mut self, code: RecordCode) {
        self.code = Some(code);
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Write every field of `decl`, root level first, and set its code.
    pub(crate) fn visit(&mut self, decl: &Decl) -> Result {
        match &decl.kind {
            DeclKind::TranslationUnit(d) => {
                self.visit_decl(decl);
                self.push_decl(d.anonymous_namespace);
                self.set_code(RecordCode::DeclTranslationUnit);
            }
            DeclKind::LinkageSpec(d) => {
                self.visit_decl(decl);
                self.push(d.language as u64);
                self.push_bool(d.has_braces);
                self.set_code(RecordCode::DeclLinkageSpec);
            }
            DeclKind::FileScopeAsm(d) => {
                self.visit_decl(decl);
                self.queue(d.asm_string);
                self.set_code(RecordCode::DeclFileScopeAsm);
            }
            DeclKind::AccessSpec(d) => {
                self.visit_decl(decl);
                self.push_loc(d.colon_loc);
                self.set_code(RecordCode::DeclAccessSpec);
            }
            DeclKind::Block(d) => self.visit_block(decl, d),
            DeclKind::ObjcClass(d) => {
                self.visit_decl(decl);
                self.push_located_refs(&d.classes);
                self.set_code(RecordCode::DeclObjcClass);
            }
            DeclKind::ObjcForwardProtocol(d) => {
                self.visit_decl(decl);
                self.push_located_refs(&d.protocols);
                self.set_code(RecordCode::DeclObjcForwardProtocol);
            }
            DeclKind::ObjcPropertyImpl(d) => {
                self.visit_decl(decl);
                self.push_loc(d.loc_start);
                self.push_decl(d.property);
                self.push_decl(d.ivar);
                self.set_code(RecordCode::DeclObjcPropertyImpl);
            }

            DeclKind::Namespace(d) => self.visit_namespace(decl, d)?,
            DeclKind::NamespaceAlias(d) => self.visit_namespace_alias(decl, d)?,
            DeclKind::Using(d) => self.visit_using(decl, d)?,
            DeclKind::UsingShadow(d) => self.visit_using_shadow(decl, d)?,
            DeclKind::UsingDirective(d) => self.visit_using_directive(decl, d)?,
            DeclKind::ObjcMethod(d) => self.visit_objc_method(decl, d)?,
            DeclKind::ObjcInterface(d) => self.visit_objc_interface(decl, d)?,
            DeclKind::ObjcProtocol(d) => self.visit_objc_protocol(decl, d)?,
            DeclKind::ObjcCategory(d) => self.visit_objc_category(decl, d)?,
            DeclKind::ObjcCategoryImpl(d) => {
                self.visit_objc_impl(decl, &d.imp)?;
                self.push_ident(d.identifier)?;
                self.set_code(RecordCode::DeclObjcCategoryImpl);
            }
            DeclKind::ObjcImplementation(d) => {
                self.visit_objc_impl(decl, &d.imp)?;
                self.push_decl(d.super_class);
                self.set_code(RecordCode::DeclObjcImplementation);
            }
            DeclKind::ObjcCompatibleAlias(d) => {
                self.visit_named(decl, &d.named)?;
                self.push_decl(d.class_interface);
                self.set_code(RecordCode::DeclObjcCompatibleAlias);
            }
            DeclKind::ObjcProperty(d) => self.visit_objc_property(decl, d)?,
            DeclKind::ClassTemplate(d) => self.visit_class_template(decl, d)?,
            DeclKind::FunctionTemplate(d) => self.visit_function_template(decl, d)?,

            DeclKind::Typedef(d) => self.visit_typedef(decl, d)?,
            DeclKind::UnresolvedUsingTypename(d) => self.visit_unresolved_using_typename(decl, d)?,
            DeclKind::TemplateTypeParm(d) => self.visit_template_type_parm(decl, d)?,
            DeclKind::Enum(d) => self.visit_enum(decl, d)?,
            DeclKind::Record(d) => {
                self.visit_record(decl, d, true)?;
                self.set_code(RecordCode::DeclRecord);
            }
            DeclKind::CxxRecord(d) => self.visit_cxx_record(decl, d)?,

            DeclKind::EnumConstant(d) => self.visit_enum_constant(decl, d)?,
            DeclKind::UnresolvedUsingValue(d) => self.visit_unresolved_using_value(decl, d)?,
            DeclKind::Function(d) => {
                self.visit_function(decl, d)?;
                self.set_code(RecordCode::DeclFunction);
            }
            DeclKind::CxxMethod(d) => {
                self.visit_function(decl, d)?;
                self.set_code(RecordCode::DeclCxxMethod);
            }
            DeclKind::CxxConstructor(d) => {
                self.visit_function(decl, d)?;
                self.set_code(RecordCode::DeclCxxConstructor);
            }
            DeclKind::CxxDestructor(d) => {
                self.visit_function(decl, d)?;
                self.set_code(RecordCode::DeclCxxDestructor);
            }
            DeclKind::CxxConversion(d) => {
                self.visit_function(decl, d)?;
                self.set_code(RecordCode::DeclCxxConversion);
            }
            DeclKind::Field(d) => {
                self.visit_field(decl, d)?;
                self.set_code(RecordCode::DeclField);
            }
            DeclKind::ObjcIvar(d) => {
                self.visit_field(decl, &d.field)?;
                self.push(d.access_control as u64);
                self.set_code(RecordCode::DeclObjcIvar);
            }
            DeclKind::ObjcAtDefsField(d) => {
                self.visit_field(decl, d)?;
                self.set_code(RecordCode::DeclObjcAtDefsField);
            }
            DeclKind::Var(d) => {
                self.visit_var(decl, d)?;
                self.set_code(RecordCode::DeclVar);
            }
            DeclKind::ImplicitParam(d) => {
                self.visit_var(decl, d)?;
                self.set_code(RecordCode::DeclImplicitParam);
            }
            DeclKind::ParmVar(d) => self.visit_parm_var(decl, d)?,

            DeclKind::FriendTemplate
            | DeclKind::ClassTemplateSpecialization
            | DeclKind::ClassTemplatePartialSpecialization
            | DeclKind::NonTypeTemplateParm
            | DeclKind::TemplateTemplateParm
            | DeclKind::StaticAssert => {
                return Err(WriteError::UnsupportedKind {
                    kind: decl.kind.name(),
                });
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Abstract levels
    // ------------------------------------------------------------------

    fn visit_decl(&mut self, decl: &Decl) {
        self.push_decl(decl.semantic_dc);
        self.push_decl(decl.lexical_dc);
        self.push_loc(decl.loc);
        self.push_bool(decl.invalid);
        self.push_bool(decl.has_attrs());
        self.push_bool(decl.implicit);
        self.push_bool(decl.used);
        self.push(decl.access as u64);
        self.push(u64::from(decl.level));
    }

    fn visit_named(&mut self, decl: &Decl, named: &NamedDecl) -> Result {
        self.visit_decl(decl);
        self.push_name(&named.name)
    }

    /// `write_type` is false for C++ classes, which write their type later.
    fn visit_type(&mut self, decl: &Decl, d: &TypeDecl, write_type: bool) -> Result {
        self.visit_named(decl, &d.named)?;
        if write_type {
            self.push_type(d.type_for_decl);
        } else {
            self.push_type(None);
        }
        Ok(())
    }

    fn visit_value(&mut self, decl: &Decl, d: &ValueDecl) -> Result {
        self.visit_named(decl, &d.named)?;
        self.push_type(d.ty);
        Ok(())
    }

    fn visit_declarator(&mut self, decl: &Decl, d: &DeclaratorDecl) -> Result {
        self.visit_value(decl, &d.value)?;
        self.push_type_info(d.type_info);
        Ok(())
    }

    fn visit_tag(&mut self, decl: &Decl, d: &TagDecl, write_type: bool) -> Result {
        self.visit_type(decl, &d.ty, write_type)?;
        self.push_decl(d.previous);
        self.push(d.tag_kind as u64);
        self.push_bool(d.is_definition);
        self.push_bool(d.embedded_in_declarator);
        self.push_loc(d.rbrace_loc);
        self.push_loc(d.tag_keyword_loc);
        self.push_decl(d.typedef_for_anon);
        Ok(())
    }

    fn visit_template(&mut self, decl: &Decl, d: &TemplateDecl) -> Result {
        self.visit_named(decl, &d.named)?;
        self.push_decl(d.templated);
        self.push_loc(d.params.template_loc);
        self.push_loc(d.params.langle_loc);
        self.push_loc(d.params.rangle_loc);
        self.push_decls(&d.params.params);
        Ok(())
    }

    fn visit_objc_container(&mut self, decl: &Decl, d: &ObjcContainerDecl) -> Result {
        self.visit_named(decl, &d.named)?;
        self.push_range(d.at_end_range);
        Ok(())
    }

    fn visit_objc_impl(&mut self, decl: &Decl, d: &ObjcImplDecl) -> Result {
        self.visit_objc_container(decl, &d.container)?;
        self.push_decl(d.class_interface);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Decl-level kinds
    // ------------------------------------------------------------------

    fn visit_block(&mut self, decl: &Decl, d: &BlockDecl) {
        self.visit_decl(decl);
        self.queue(d.body);
        self.push_type_info(d.signature);
        self.push_decls(&d.params);
        self.set_code(RecordCode::DeclBlock);
    }

    // ------------------------------------------------------------------
    // Named kinds
    // ------------------------------------------------------------------

    fn visit_namespace(&mut self, decl: &Decl, d: &NamespaceDecl) -> Result {
        self.visit_named(decl, &d.named)?;
        self.push_loc(d.lbrace_loc);
        self.push_loc(d.rbrace_loc);
        self.push_decl(d.next_namespace);
        self.push_bool(d.is_original());
        match d.original_namespace {
            None => self.push_decl(d.anonymous_namespace),
            Some(original) => self.push_decl(Some(original)),
        }
        self.set_code(RecordCode::DeclNamespace);
        Ok(())
    }

    fn visit_namespace_alias(&mut self, decl: &Decl, d: &NamespaceAliasDecl) -> Result {
        self.visit_named(decl, &d.named)?;
        self.push_loc(d.alias_loc);
        self.push_range(d.qualifier_range);
        self.push_qualifier(d.qualifier.as_ref())?;
        self.push_loc(d.target_name_loc);
        self.push_decl(d.namespace);
        self.set_code(RecordCode::DeclNamespaceAlias);
        Ok(())
    }

    fn visit_using(&mut self, decl: &Decl, d: &UsingDecl) -> Result {
        self.visit_named(decl, &d.named)?;
        self.push_range(d.nested_name_range);
        self.push_loc(d.using_loc);
        self.push_qualifier(d.qualifier.as_ref())?;
        self.push_decls(&d.shadows);
        self.push_bool(d.is_typename);
        self.set_code(RecordCode::DeclUsing);
        Ok(())
    }

    fn visit_using_shadow(&mut self, decl: &Decl, d: &UsingShadowDecl) -> Result {
        self.visit_named(decl, &d.named)?;
        self.push_decl(d.target);
        self.push_decl(d.using);
        self.set_code(RecordCode::DeclUsingShadow);
        Ok(())
    }

    fn visit_using_directive(&mut self, decl: &Decl, d: &UsingDirectiveDecl) -> Result {
        self.visit_named(decl, &d.named)?;
        self.push_loc(d.namespace_key_loc);
        self.push_range(d.qualifier_range);
        self.push_qualifier(d.qualifier.as_ref())?;
        self.push_loc(d.ident_loc);
        self.push_decl(d.nominated_namespace);
        self.push_decl(d.common_ancestor);
        self.set_code(RecordCode::DeclUsingDirective);
        Ok(())
    }

    fn visit_objc_method(&mut self, decl: &Decl, d: &ObjcMethodDecl) -> Result {
        self.visit_named(decl, &d.named)?;
        self.push_bool(d.body.is_some());
        if let Some(body) = &d.body {
            self.queue(body.body);
            self.push_decl(body.self_decl);
            self.push_decl(body.cmd_decl);
        }
        self.push_bool(d.is_instance);
        self.push_bool(d.is_variadic);
        self.push_bool(d.is_synthesized);
        self.push(d.implementation_control as u64);
        self.push(u64::from(d.objc_qualifier));
        self.push(u64::from(d.num_selector_args));
        self.push_type(d.result_type);
        self.push_type_info(d.result_type_info);
        self.push_loc(d.end_loc);
        self.push_decls(&d.params);
        self.set_code(RecordCode::DeclObjcMethod);
        Ok(())
    }

    fn visit_objc_interface(&mut self, decl: &Decl, d: &ObjcInterfaceDecl) -> Result {
        self.visit_objc_container(decl, &d.container)?;
        self.push_type(d.type_for_decl);
        self.push_decl(d.super_class);
        self.push_located_refs(&d.protocols);
        self.push_decls(&d.ivars);
        self.push_decl(d.category_list);
        self.push_bool(d.forward_decl);
        self.push_bool(d.implicit_interface);
        self.push_loc(d.class_loc);
        self.push_loc(d.super_class_loc);
        self.push_loc(d.end_loc);
        self.set_code(RecordCode::DeclObjcInterface);
        Ok(())
    }

    fn visit_objc_protocol(&mut self, decl: &Decl, d: &ObjcProtocolDecl) -> Result {
        self.visit_objc_container(decl, &d.container)?;
        self.push_bool(d.forward_decl);
        self.push_loc(d.end_loc);
        self.push_located_refs(&d.protocols);
        self.set_code(RecordCode::DeclObjcProtocol);
        Ok(())
    }

    fn visit_objc_category(&mut self, decl: &Decl, d: &ObjcCategoryDecl) -> Result {
        self.visit_objc_container(decl, &d.container)?;
        self.push_decl(d.class_interface);
        self.push_located_refs(&d.protocols);
        self.push_decl(d.next_class_category);
        self.push_loc(d.at_loc);
        self.push_loc(d.category_name_loc);
        self.set_code(RecordCode::DeclObjcCategory);
        Ok(())
    }

    fn visit_objc_property(&mut self, decl: &Decl, d: &ObjcPropertyDecl) -> Result {
        self.visit_named(decl, &d.named)?;
        self.push_loc(d.at_loc);
        self.push_type_info(d.type_info);
        self.push(u64::from(d.attributes));
        self.push(u64::from(d.attributes_as_written));
        self.push(d.implementation as u64);
        self.push_name(&d.getter_name)?;
        self.push_name(&d.setter_name)?;
        self.push_decl(d.getter);
        self.push_decl(d.setter);
        self.push_decl(d.ivar);
        self.set_code(RecordCode::DeclObjcProperty);
        Ok(())
    }

    fn visit_class_template(&mut self, decl: &Decl, d: &ClassTemplateDecl) -> Result {
        self.visit_template(decl, &d.template)?;
        self.push_decl(d.previous);
        if d.previous.is_none() {
            self.push_decls(&d.specializations);
            self.push_decls(&d.partial_specializations);
            self.push_decl(d.instantiated_from_member);
            if d.instantiated_from_member.is_some() {
                self.push_bool(d.member_specialization);
            }
        }
        self.set_code(RecordCode::DeclClassTemplate);
        Ok(())
    }

    fn visit_function_template(&mut self, decl: &Decl, d: &FunctionTemplateDecl) -> Result {
        self.visit_template(decl, &d.template)?;
        self.push_decl(d.previous);
        if d.previous.is_none() {
            self.push_decl(d.instantiated_from_member);
            if d.instantiated_from_member.is_some() {
                self.push_bool(d.member_specialization);
            }
        }
        self.set_code(RecordCode::DeclFunctionTemplate);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Type kinds
    // ------------------------------------------------------------------

    fn visit_typedef(&mut self, decl: &Decl, d: &TypedefDecl) -> Result {
        self.visit_type(decl, &d.ty, true)?;
        self.push_type_info(d.type_info);
        self.set_code(RecordCode::DeclTypedef);
        Ok(())
    }

    fn visit_unresolved_using_typename(
        &mut self,
        decl: &Decl,
        d: &UnresolvedUsingTypenameDecl,
    ) -> Result {
        self.visit_type(decl, &d.ty, true)?;
        self.push_range(d.target_range);
        self.push_loc(d.using_loc);
        self.push_loc(d.typename_loc);
        self.push_qualifier(d.qualifier.as_ref())?;
        self.set_code(RecordCode::DeclUnresolvedUsingTypename);
        Ok(())
    }

    fn visit_template_type_parm(&mut self, decl: &Decl, d: &TemplateTypeParmDecl) -> Result {
        self.visit_type(decl, &d.ty, true)?;
        self.push_bool(d.declared_with_typename);
        self.push_bool(d.parameter_pack);
        self.push_bool(d.default_argument_inherited);
        self.push_type_info(d.default_argument);
        self.set_code(RecordCode::DeclTemplateTypeParm);
        Ok(())
    }

    fn visit_enum(&mut self, decl: &Decl, d: &EnumDecl) -> Result {
        self.visit_tag(decl, &d.tag, true)?;
        self.push_type(d.integer_type);
        self.push_type(d.promotion_type);
        self.push(u64::from(d.num_positive_bits));
        self.push(u64::from(d.num_negative_bits));
        self.set_code(RecordCode::DeclEnum);
        Ok(())
    }

    fn visit_record(&mut self, decl: &Decl, d: &RecordDecl, write_type: bool) -> Result {
        self.visit_tag(decl, &d.tag, write_type)?;
        self.push_bool(d.has_flexible_array_member);
        self.push_bool(d.anonymous_struct_or_union);
        self.push_bool(d.has_object_member);
        Ok(())
    }

    fn visit_cxx_record(&mut self, decl: &Decl, d: &CxxRecordDecl) -> Result {
        self.visit_record(decl, &d.record, false)?;

        self.push(d.template.kind_tag());
        match &d.template {
            CxxRecordTemplate::NotTemplate => {}
            CxxRecordTemplate::Template(template) => self.push_decl(Some(*template)),
            CxxRecordTemplate::MemberSpecialization(info) => {
                self.push_decl(Some(info.instantiated_from));
                self.push(info.kind as u64);
                self.push_loc(info.point_of_instantiation);
            }
        }

        self.push_type(d.record.tag.ty.type_for_decl);

        if d.record.tag.is_definition {
            self.push(d.bases.len() as u64);
            for base in &d.bases {
                self.push_bool(base.is_virtual);
                self.push_bool(base.base_of_class);
                self.push(base.access_as_written as u64);
                self.push_type(Some(base.ty));
                self.push_range(base.range);
            }
        }
        self.set_code(RecordCode::DeclCxxRecord);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Value kinds
    // ------------------------------------------------------------------

    fn visit_enum_constant(&mut self, decl: &Decl, d: &EnumConstantDecl) -> Result {
        self.visit_value(decl, &d.value)?;
        self.push_bool(d.init.is_some());
        if let Some(init) = d.init {
            self.queue(init);
        }
        self.push_aps_int(&d.init_val);
        self.set_code(RecordCode::DeclEnumConstant);
        Ok(())
    }

    fn visit_unresolved_using_value(&mut self, decl: &Decl, d: &UnresolvedUsingValueDecl) -> Result {
        self.visit_value(decl, &d.value)?;
        self.push_range(d.target_range);
        self.push_loc(d.using_loc);
        self.push_qualifier(d.qualifier.as_ref())?;
        self.set_code(RecordCode::DeclUnresolvedUsingValue);
        Ok(())
    }

    fn visit_function(&mut self, decl: &Decl, d: &FunctionDecl) -> Result {
        self.visit_declarator(decl, &d.declarator)?;
        self.push_bool(d.is_definition());
        if let Some(body) = d.body {
            self.queue(body);
        }
        self.push_decl(d.previous);
        self.push(d.storage_class as u64);
        self.push(d.storage_class_as_written as u64);
        self.push_bool(d.inline_specified);
        self.push_bool(d.virtual_as_written);
        self.push_bool(d.pure);
        self.push_bool(d.inherited_prototype);
        self.push_bool(d.written_prototype);
        self.push_bool(d.deleted);
        self.push_bool(d.trivial);
        self.push_bool(d.copy_assignment);
        self.push_bool(d.implicit_return_zero);
        self.push_loc(d.end_loc);
        self.visit_function_template_kind(&d.template);
        self.push_decls(&d.params);
        Ok(())
    }

    fn visit_function_template_kind(&mut self, template: &FunctionTemplateKind) {
        self.push(template.kind_tag());
        match template {
            FunctionTemplateKind::NonTemplate => {}
            FunctionTemplateKind::Primary(described) => self.push_decl(Some(*described)),
            FunctionTemplateKind::MemberSpecialization(info) => {
                self.push_decl(Some(info.instantiated_from));
                self.push(info.kind as u64);
                self.push_loc(info.point_of_instantiation);
            }
            FunctionTemplateKind::Specialization(info) => {
                self.push_decl(Some(info.template));
                self.push(info.kind as u64);

                self.push(info.args.len() as u64);
                for arg in &info.args {
                    self.push_template_arg(arg);
                }

                match &info.args_as_written {
                    Some(written) => {
                        self.push(written.args.len() as u64);
                        for arg in &written.args {
                            self.push_template_arg_loc(arg);
                        }
                        self.push_loc(written.langle_loc);
                        self.push_loc(written.rangle_loc);
                    }
                    None => self.push(0),
                }
            }
            FunctionTemplateKind::DependentSpecialization(info) => {
                self.push_decls(&info.templates);
                self.push(info.args.len() as u64);
                for arg in &info.args {
                    self.push_template_arg_loc(arg);
                }
            }
        }
    }

    fn visit_field(&mut self, decl: &Decl, d: &FieldDecl) -> Result {
        self.visit_declarator(decl, &d.declarator)?;
        self.push_bool(d.mutable);
        self.push_bool(d.bit_width.is_some());
        if let Some(width) = d.bit_width {
            self.queue(width);
        }
        Ok(())
    }

    fn visit_var(&mut self, decl: &Decl, d: &VarDecl) -> Result {
        self.visit_declarator(decl, &d.declarator)?;
        self.push(d.storage_class as u64);
        self.push(d.storage_class_as_written as u64);
        self.push_bool(d.thread_specified);
        self.push_bool(d.direct_initializer);
        self.push_bool(d.declared_in_condition);
        self.push_bool(d.exception_variable);
        self.push_bool(d.nrvo_variable);
        self.push_decl(d.previous);
        self.push_bool(d.init.is_some());
        if let Some(init) = d.init {
            self.queue(init);
        }
        Ok(())
    }

    fn visit_parm_var(&mut self, decl: &Decl, d: &ParmVarDecl) -> Result {
        check_parm_var(decl, d)?;
        self.visit_var(decl, &d.var)?;
        self.push(u64::from(d.objc_qualifier));
        self.push_bool(d.inherited_default_arg);
        self.set_code(RecordCode::DeclParmVar);
        Ok(())
    }
}

/// Parameters never carry these; seeing one means the graph is corrupt.
fn check_parm_var(decl: &Decl, d: &ParmVarDecl) -> Result {
    let reason = if decl.invalid {
        "parameter is invalid"
    } else if d.var.thread_specified {
        "parameter is thread-specified"
    } else if decl.access != AccessSpecifier::None {
        "parameter has an access specifier"
    } else if d.var.declared_in_condition {
        "parameter is declared in a condition"
    } else if d.var.exception_variable {
        "parameter is an exception variable"
    } else if d.var.previous.is_some() {
        "parameter is redeclared"
    } else {
        return Ok(());
    };
    Err(WriteError::InvariantViolation {
        kind: "ParmVar",
        reason,
    })
}
