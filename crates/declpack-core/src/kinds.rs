//! Declaration kinds.
//!
//! Every concrete kind is a variant of [`DeclKind`]. Its payload embeds the
//! payload of its parent level, so a `ParmVarDecl` contains a `VarDecl`, which
//! contains a `DeclaratorDecl`, and so on up to `NamedDecl`. The fields common
//! to every declaration live on [`Decl`](crate::Decl) itself.
//!
//! Hierarchy (abstract levels in parentheses):
//!
//! ```text
//! Decl ─┬─ TranslationUnit, LinkageSpec, FileScopeAsm, AccessSpec, Block,
//!       │  ObjcClass, ObjcForwardProtocol, ObjcPropertyImpl
//!       └─ (Named) ─┬─ Namespace, NamespaceAlias, Using, UsingShadow, UsingDirective,
//!                   │  ObjcMethod, ObjcCompatibleAlias, ObjcProperty
//!                   ├─ (ObjcContainer) ─ ObjcInterface, ObjcProtocol, ObjcCategory,
//!                   │                    (ObjcImpl) ─ ObjcCategoryImpl, ObjcImplementation
//!                   ├─ (Template) ─ ClassTemplate, FunctionTemplate
//!                   ├─ (Type) ─┬─ Typedef, UnresolvedUsingTypename, TemplateTypeParm
//!                   │          └─ (Tag) ─ Enum, Record ─ CxxRecord
//!                   └─ (Value) ─┬─ EnumConstant, UnresolvedUsingValue
//!                               └─ (Declarator) ─┬─ Function ─ CxxMethod ─ ctor/dtor/conversion
//!                                                ├─ Field ─ ObjcIvar, ObjcAtDefsField
//!                                                └─ Var ─ ImplicitParam, ParmVar
//! ```

use crate::{
    AccessSpecifier, ApsInt, DeclIdx, DeclName, FunctionTemplateKind, LinkageLanguage,
    MemberSpecializationInfo, NestedNameSpecifier, SourceLocation, SourceRange, StmtHandle,
    StorageClass, Symbol, TagKind, TemplateParameterList, TypeHandle, TypeSourceInfo,
};

// ============================================================================
// Abstract levels
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedDecl {
    pub name: DeclName,
}

impl NamedDecl {
    pub fn new(name: DeclName) -> Self {
        Self { name }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeDecl {
    pub named: NamedDecl,
    /// The type this declaration introduces.
    pub type_for_decl: Option<TypeHandle>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueDecl {
    pub named: NamedDecl,
    pub ty: Option<TypeHandle>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclaratorDecl {
    pub value: ValueDecl,
    pub type_info: Option<TypeSourceInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagDecl {
    pub ty: TypeDecl,
    pub previous: Option<DeclIdx>,
    pub tag_kind: TagKind,
    pub is_definition: bool,
    pub embedded_in_declarator: bool,
    pub rbrace_loc: SourceLocation,
    pub tag_keyword_loc: SourceLocation,
    pub typedef_for_anon: Option<DeclIdx>,
    /// The defining declaration of this tag, when this one is not it.
    pub definition: Option<DeclIdx>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateDecl {
    pub named: NamedDecl,
    pub templated: Option<DeclIdx>,
    pub params: TemplateParameterList,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcContainerDecl {
    pub named: NamedDecl,
    pub at_end_range: SourceRange,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcImplDecl {
    pub container: ObjcContainerDecl,
    pub class_interface: Option<DeclIdx>,
}

/// Reference paired with the location where it was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocatedRef {
    pub decl: DeclIdx,
    pub loc: SourceLocation,
}

impl LocatedRef {
    pub fn new(decl: DeclIdx, loc: SourceLocation) -> Self {
        Self { decl, loc }
    }
}

// ============================================================================
// Decl-level kinds
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationUnitDecl {
    pub anonymous_namespace: Option<DeclIdx>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkageSpecDecl {
    pub language: LinkageLanguage,
    pub has_braces: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileScopeAsmDecl {
    pub asm_string: StmtHandle,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessSpecDecl {
    pub colon_loc: SourceLocation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockDecl {
    pub body: StmtHandle,
    pub signature: Option<TypeSourceInfo>,
    pub params: Vec<DeclIdx>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcClassDecl {
    pub classes: Vec<LocatedRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcForwardProtocolDecl {
    pub protocols: Vec<LocatedRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcPropertyImplDecl {
    pub loc_start: SourceLocation,
    pub property: Option<DeclIdx>,
    pub ivar: Option<DeclIdx>,
}

// ============================================================================
// Named kinds
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceDecl {
    pub named: NamedDecl,
    pub lbrace_loc: SourceLocation,
    pub rbrace_loc: SourceLocation,
    pub next_namespace: Option<DeclIdx>,
    /// First declaration of this namespace; `None` when this is it.
    pub original_namespace: Option<DeclIdx>,
    pub anonymous_namespace: Option<DeclIdx>,
}

impl NamespaceDecl {
    pub fn is_original(&self) -> bool {
        self.original_namespace.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceAliasDecl {
    pub named: NamedDecl,
    pub alias_loc: SourceLocation,
    pub qualifier_range: SourceRange,
    pub qualifier: Option<NestedNameSpecifier>,
    pub target_name_loc: SourceLocation,
    pub namespace: Option<DeclIdx>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsingDecl {
    pub named: NamedDecl,
    pub nested_name_range: SourceRange,
    pub using_loc: SourceLocation,
    pub qualifier: Option<NestedNameSpecifier>,
    pub shadows: Vec<DeclIdx>,
    pub is_typename: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsingShadowDecl {
    pub named: NamedDecl,
    pub target: Option<DeclIdx>,
    pub using: Option<DeclIdx>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsingDirectiveDecl {
    pub named: NamedDecl,
    pub namespace_key_loc: SourceLocation,
    pub qualifier_range: SourceRange,
    pub qualifier: Option<NestedNameSpecifier>,
    pub ident_loc: SourceLocation,
    pub nominated_namespace: Option<DeclIdx>,
    pub common_ancestor: Option<DeclIdx>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ImplementationControl {
    #[default]
    None = 0,
    Required = 1,
    Optional = 2,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjcMethodBody {
    pub body: StmtHandle,
    pub self_decl: Option<DeclIdx>,
    pub cmd_decl: Option<DeclIdx>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcMethodDecl {
    pub named: NamedDecl,
    pub body: Option<ObjcMethodBody>,
    pub is_instance: bool,
    pub is_variadic: bool,
    pub is_synthesized: bool,
    pub implementation_control: ImplementationControl,
    /// Bitset of in/out/inout/bycopy/byref/oneway.
    pub objc_qualifier: u8,
    pub num_selector_args: u32,
    pub result_type: Option<TypeHandle>,
    pub result_type_info: Option<TypeSourceInfo>,
    pub end_loc: SourceLocation,
    pub params: Vec<DeclIdx>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcInterfaceDecl {
    pub container: ObjcContainerDecl,
    pub type_for_decl: Option<TypeHandle>,
    pub super_class: Option<DeclIdx>,
    pub protocols: Vec<LocatedRef>,
    pub ivars: Vec<DeclIdx>,
    pub category_list: Option<DeclIdx>,
    pub forward_decl: bool,
    pub implicit_interface: bool,
    pub class_loc: SourceLocation,
    pub super_class_loc: SourceLocation,
    pub end_loc: SourceLocation,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcProtocolDecl {
    pub container: ObjcContainerDecl,
    pub forward_decl: bool,
    pub end_loc: SourceLocation,
    pub protocols: Vec<LocatedRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcCategoryDecl {
    pub container: ObjcContainerDecl,
    pub class_interface: Option<DeclIdx>,
    pub protocols: Vec<LocatedRef>,
    pub next_class_category: Option<DeclIdx>,
    pub at_loc: SourceLocation,
    pub category_name_loc: SourceLocation,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcCategoryImplDecl {
    pub imp: ObjcImplDecl,
    pub identifier: Option<Symbol>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcImplementationDecl {
    pub imp: ObjcImplDecl,
    pub super_class: Option<DeclIdx>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcCompatibleAliasDecl {
    pub named: NamedDecl,
    pub class_interface: Option<DeclIdx>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum PropertyControl {
    #[default]
    None = 0,
    Required = 1,
    Optional = 2,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcPropertyDecl {
    pub named: NamedDecl,
    pub at_loc: SourceLocation,
    pub type_info: Option<TypeSourceInfo>,
    /// Bitset of readonly/assign/retain/copy/nonatomic/… attributes.
    pub attributes: u32,
    pub attributes_as_written: u32,
    pub implementation: PropertyControl,
    pub getter_name: DeclName,
    pub setter_name: DeclName,
    pub getter: Option<DeclIdx>,
    pub setter: Option<DeclIdx>,
    pub ivar: Option<DeclIdx>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassTemplateDecl {
    pub template: TemplateDecl,
    pub previous: Option<DeclIdx>,
    pub specializations: Vec<DeclIdx>,
    pub partial_specializations: Vec<DeclIdx>,
    pub instantiated_from_member: Option<DeclIdx>,
    pub member_specialization: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionTemplateDecl {
    pub template: TemplateDecl,
    pub previous: Option<DeclIdx>,
    pub instantiated_from_member: Option<DeclIdx>,
    pub member_specialization: bool,
}

// ============================================================================
// Type kinds
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypedefDecl {
    pub ty: TypeDecl,
    pub type_info: Option<TypeSourceInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnresolvedUsingTypenameDecl {
    pub ty: TypeDecl,
    pub target_range: SourceRange,
    pub using_loc: SourceLocation,
    pub typename_loc: SourceLocation,
    pub qualifier: Option<NestedNameSpecifier>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateTypeParmDecl {
    pub ty: TypeDecl,
    pub declared_with_typename: bool,
    pub parameter_pack: bool,
    pub default_argument_inherited: bool,
    pub default_argument: Option<TypeSourceInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumDecl {
    pub tag: TagDecl,
    pub integer_type: Option<TypeHandle>,
    pub promotion_type: Option<TypeHandle>,
    pub num_positive_bits: u32,
    pub num_negative_bits: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordDecl {
    pub tag: TagDecl,
    pub has_flexible_array_member: bool,
    pub anonymous_struct_or_union: bool,
    pub has_object_member: bool,
}

/// Template role of a C++ class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CxxRecordTemplate {
    #[default]
    NotTemplate,
    /// Pattern of the described class template.
    Template(DeclIdx),
    MemberSpecialization(MemberSpecializationInfo),
}

impl CxxRecordTemplate {
    pub fn kind_tag(&self) -> u64 {
        match self {
            Self::NotTemplate => 0,
            Self::Template(_) => 1,
            Self::MemberSpecialization(_) => 2,
        }
    }
}

/// Base class specifier, stored inline in the class record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseSpecifier {
    pub is_virtual: bool,
    /// Base of a `class` (as opposed to a `struct`), which affects default access.
    pub base_of_class: bool,
    pub access_as_written: AccessSpecifier,
    pub ty: TypeHandle,
    pub range: SourceRange,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CxxRecordDecl {
    pub record: RecordDecl,
    pub template: CxxRecordTemplate,
    pub bases: Vec<BaseSpecifier>,
}

// ============================================================================
// Value kinds
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumConstantDecl {
    pub value: ValueDecl,
    pub init: Option<StmtHandle>,
    pub init_val: ApsInt,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnresolvedUsingValueDecl {
    pub value: ValueDecl,
    pub target_range: SourceRange,
    pub using_loc: SourceLocation,
    pub qualifier: Option<NestedNameSpecifier>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionDecl {
    pub declarator: DeclaratorDecl,
    /// Present exactly when this declaration is a definition.
    pub body: Option<StmtHandle>,
    pub previous: Option<DeclIdx>,
    pub storage_class: StorageClass,
    pub storage_class_as_written: StorageClass,
    pub inline_specified: bool,
    pub virtual_as_written: bool,
    pub pure: bool,
    pub inherited_prototype: bool,
    pub written_prototype: bool,
    pub deleted: bool,
    pub trivial: bool,
    pub copy_assignment: bool,
    pub implicit_return_zero: bool,
    pub end_loc: SourceLocation,
    pub template: FunctionTemplateKind,
    pub params: Vec<DeclIdx>,
}

impl FunctionDecl {
    #[inline]
    pub fn is_definition(&self) -> bool {
        self.body.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldDecl {
    pub declarator: DeclaratorDecl,
    pub mutable: bool,
    pub bit_width: Option<StmtHandle>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum IvarAccessControl {
    #[default]
    None = 0,
    Private = 1,
    Protected = 2,
    Public = 3,
    Package = 4,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjcIvarDecl {
    pub field: FieldDecl,
    pub access_control: IvarAccessControl,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VarDecl {
    pub declarator: DeclaratorDecl,
    pub storage_class: StorageClass,
    pub storage_class_as_written: StorageClass,
    pub thread_specified: bool,
    pub direct_initializer: bool,
    pub declared_in_condition: bool,
    pub exception_variable: bool,
    pub nrvo_variable: bool,
    /// Previous declaration in the redeclaration chain; `None` for the first.
    pub previous: Option<DeclIdx>,
    pub init: Option<StmtHandle>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParmVarDecl {
    pub var: VarDecl,
    /// Bitset of in/out/inout/bycopy/byref/oneway.
    pub objc_qualifier: u8,
    pub inherited_default_arg: bool,
}

// ============================================================================
// DeclKind
// ============================================================================

/// Closed set of declaration kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclKind {
    TranslationUnit(TranslationUnitDecl),
    LinkageSpec(LinkageSpecDecl),
    FileScopeAsm(FileScopeAsmDecl),
    AccessSpec(AccessSpecDecl),
    Block(BlockDecl),
    ObjcClass(ObjcClassDecl),
    ObjcForwardProtocol(ObjcForwardProtocolDecl),
    ObjcPropertyImpl(ObjcPropertyImplDecl),

    Namespace(NamespaceDecl),
    NamespaceAlias(NamespaceAliasDecl),
    Using(UsingDecl),
    UsingShadow(UsingShadowDecl),
    UsingDirective(UsingDirectiveDecl),
    ObjcMethod(ObjcMethodDecl),
    ObjcInterface(ObjcInterfaceDecl),
    ObjcProtocol(ObjcProtocolDecl),
    ObjcCategory(ObjcCategoryDecl),
    ObjcCategoryImpl(ObjcCategoryImplDecl),
    ObjcImplementation(ObjcImplementationDecl),
    ObjcCompatibleAlias(ObjcCompatibleAliasDecl),
    ObjcProperty(ObjcPropertyDecl),
    ClassTemplate(ClassTemplateDecl),
    FunctionTemplate(FunctionTemplateDecl),

    Typedef(TypedefDecl),
    UnresolvedUsingTypename(UnresolvedUsingTypenameDecl),
    TemplateTypeParm(TemplateTypeParmDecl),
    Enum(EnumDecl),
    Record(RecordDecl),
    CxxRecord(CxxRecordDecl),

    EnumConstant(EnumConstantDecl),
    UnresolvedUsingValue(UnresolvedUsingValueDecl),
    Function(FunctionDecl),
    CxxMethod(FunctionDecl),
    CxxConstructor(FunctionDecl),
    CxxDestructor(FunctionDecl),
    CxxConversion(FunctionDecl),
    Field(FieldDecl),
    ObjcIvar(ObjcIvarDecl),
    ObjcAtDefsField(FieldDecl),
    Var(VarDecl),
    ImplicitParam(VarDecl),
    ParmVar(ParmVarDecl),

    // Eliminated before serialization; the writer rejects them.
    FriendTemplate,
    ClassTemplateSpecialization,
    ClassTemplatePartialSpecialization,
    NonTypeTemplateParm,
    TemplateTemplateParm,
    StaticAssert,
}

impl DeclKind {
    /// Kind name for diagnostics and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TranslationUnit(_) => "TranslationUnit",
            Self::LinkageSpec(_) => "LinkageSpec",
            Self::FileScopeAsm(_) => "FileScopeAsm",
            Self::AccessSpec(_) => "AccessSpec",
            Self::Block(_) => "Block",
            Self::ObjcClass(_) => "ObjcClass",
            Self::ObjcForwardProtocol(_) => "ObjcForwardProtocol",
            Self::ObjcPropertyImpl(_) => "ObjcPropertyImpl",
            Self::Namespace(_) => "Namespace",
            Self::NamespaceAlias(_) => "NamespaceAlias",
            Self::Using(_) => "Using",
            Self::UsingShadow(_) => "UsingShadow",
            Self::UsingDirective(_) => "UsingDirective",
            Self::ObjcMethod(_) => "ObjcMethod",
            Self::ObjcInterface(_) => "ObjcInterface",
            Self::ObjcProtocol(_) => "ObjcProtocol",
            Self::ObjcCategory(_) => "ObjcCategory",
            Self::ObjcCategoryImpl(_) => "ObjcCategoryImpl",
            Self::ObjcImplementation(_) => "ObjcImplementation",
            Self::ObjcCompatibleAlias(_) => "ObjcCompatibleAlias",
            Self::ObjcProperty(_) => "ObjcProperty",
            Self::ClassTemplate(_) => "ClassTemplate",
            Self::FunctionTemplate(_) => "FunctionTemplate",
            Self::Typedef(_) => "Typedef",
            Self::UnresolvedUsingTypename(_) => "UnresolvedUsingTypename",
            Self::TemplateTypeParm(_) => "TemplateTypeParm",
            Self::Enum(_) => "Enum",
            Self::Record(_) => "Record",
            Self::CxxRecord(_) => "CxxRecord",
            Self::EnumConstant(_) => "EnumConstant",
            Self::UnresolvedUsingValue(_) => "UnresolvedUsingValue",
            Self::Function(_) => "Function",
            Self::CxxMethod(_) => "CxxMethod",
            Self::CxxConstructor(_) => "CxxConstructor",
            Self::CxxDestructor(_) => "CxxDestructor",
            Self::CxxConversion(_) => "CxxConversion",
            Self::Field(_) => "Field",
            Self::ObjcIvar(_) => "ObjcIvar",
            Self::ObjcAtDefsField(_) => "ObjcAtDefsField",
            Self::Var(_) => "Var",
            Self::ImplicitParam(_) => "ImplicitParam",
            Self::ParmVar(_) => "ParmVar",
            Self::FriendTemplate => "FriendTemplate",
            Self::ClassTemplateSpecialization => "ClassTemplateSpecialization",
            Self::ClassTemplatePartialSpecialization => "ClassTemplatePartialSpecialization",
            Self::NonTypeTemplateParm => "NonTypeTemplateParm",
            Self::TemplateTemplateParm => "TemplateTemplateParm",
            Self::StaticAssert => "StaticAssert",
        }
    }

    /// Whether declarations of this kind are also scopes.
    pub fn is_decl_context(&self) -> bool {
        matches!(
            self,
            Self::TranslationUnit(_)
                | Self::LinkageSpec(_)
                | Self::Block(_)
                | Self::Namespace(_)
                | Self::ObjcMethod(_)
                | Self::ObjcInterface(_)
                | Self::ObjcProtocol(_)
                | Self::ObjcCategory(_)
                | Self::ObjcCategoryImpl(_)
                | Self::ObjcImplementation(_)
                | Self::Enum(_)
                | Self::Record(_)
                | Self::CxxRecord(_)
                | Self::Function(_)
                | Self::CxxMethod(_)
                | Self::CxxConstructor(_)
                | Self::CxxDestructor(_)
                | Self::CxxConversion(_)
        )
    }

    /// Function-like and method-like scopes have no name lookup from outside.
    pub fn is_function_or_method(&self) -> bool {
        matches!(
            self,
            Self::Block(_)
                | Self::ObjcMethod(_)
                | Self::Function(_)
                | Self::CxxMethod(_)
                | Self::CxxConstructor(_)
                | Self::CxxDestructor(_)
                | Self::CxxConversion(_)
        )
    }

    /// Scopes whose members are file-scope entities.
    pub fn is_file_context(&self) -> bool {
        matches!(self, Self::TranslationUnit(_) | Self::Namespace(_))
    }

    /// Scopes that are transparent to name lookup.
    pub fn is_transparent_context(&self) -> bool {
        matches!(self, Self::LinkageSpec(_))
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_) | Self::CxxRecord(_))
    }

    /// The named level of this declaration, if it has one.
    pub fn named(&self) -> Option<&NamedDecl> {
        let named = match self {
            Self::Namespace(d) => &d.named,
            Self::NamespaceAlias(d) => &d.named,
            Self::Using(d) => &d.named,
            Self::UsingShadow(d) => &d.named,
            Self::UsingDirective(d) => &d.named,
            Self::ObjcMethod(d) => &d.named,
            Self::ObjcInterface(d) => &d.container.named,
            Self::ObjcProtocol(d) => &d.container.named,
            Self::ObjcCategory(d) => &d.container.named,
            Self::ObjcCategoryImpl(d) => &d.imp.container.named,
            Self::ObjcImplementation(d) => &d.imp.container.named,
            Self::ObjcCompatibleAlias(d) => &d.named,
            Self::ObjcProperty(d) => &d.named,
            Self::ClassTemplate(d) => &d.template.named,
            Self::FunctionTemplate(d) => &d.template.named,
            Self::Typedef(d) => &d.ty.named,
            Self::UnresolvedUsingTypename(d) => &d.ty.named,
            Self::TemplateTypeParm(d) => &d.ty.named,
            Self::Enum(d) => &d.tag.ty.named,
            Self::Record(d) => &d.tag.ty.named,
            Self::CxxRecord(d) => &d.record.tag.ty.named,
            Self::EnumConstant(d) => &d.value.named,
            Self::UnresolvedUsingValue(d) => &d.value.named,
            Self::Function(d)
            | Self::CxxMethod(d)
            | Self::CxxConstructor(d)
            | Self::CxxDestructor(d)
            | Self::CxxConversion(d) => &d.declarator.value.named,
            Self::Field(d) | Self::ObjcAtDefsField(d) => &d.declarator.value.named,
            Self::ObjcIvar(d) => &d.field.declarator.value.named,
            Self::Var(d) | Self::ImplicitParam(d) => &d.declarator.value.named,
            Self::ParmVar(d) => &d.var.declarator.value.named,
            _ => return None,
        };
        Some(named)
    }

    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match self {
            Self::Function(d)
            | Self::CxxMethod(d)
            | Self::CxxConstructor(d)
            | Self::CxxDestructor(d)
            | Self::CxxConversion(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<&VarDecl> {
        match self {
            Self::Var(d) | Self::ImplicitParam(d) => Some(d),
            Self::ParmVar(d) => Some(&d.var),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&TagDecl> {
        match self {
            Self::Enum(d) => Some(&d.tag),
            Self::Record(d) => Some(&d.tag),
            Self::CxxRecord(d) => Some(&d.record.tag),
            _ => None,
        }
    }
}
