//! Record codes.
//!
//! Every record in the stream carries one of these codes. Declaration codes
//! come first, then the scope sub-block codes, statement delimiters and the
//! module-level tables written at finish.

macro_rules! record_codes {
    ($( $(#[$doc:meta])* $variant:ident = $value:literal => $name:literal, )*) => {
        /// Code identifying the shape of a record.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(u8)]
        pub enum RecordCode {
            $( $(#[$doc])* $variant = $value, )*
        }

        impl RecordCode {
            /// Convert from raw discriminant.
            pub fn from_u8(v: u8) -> Option<Self> {
                match v {
                    $( $value => Some(Self::$variant), )*
                    _ => None,
                }
            }

            /// Upper-case name used in dumps.
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }
        }
    };
}

record_codes! {
    /// Attribute list of the preceding declaration.
    DeclAttr = 1 => "DECL_ATTR",
    DeclTranslationUnit = 2 => "DECL_TRANSLATION_UNIT",
    DeclTypedef = 3 => "DECL_TYPEDEF",
    DeclEnum = 4 => "DECL_ENUM",
    DeclRecord = 5 => "DECL_RECORD",
    DeclEnumConstant = 6 => "DECL_ENUM_CONSTANT",
    DeclFunction = 7 => "DECL_FUNCTION",
    DeclObjcMethod = 8 => "DECL_OBJC_METHOD",
    DeclObjcInterface = 9 => "DECL_OBJC_INTERFACE",
    DeclObjcProtocol = 10 => "DECL_OBJC_PROTOCOL",
    DeclObjcIvar = 11 => "DECL_OBJC_IVAR",
    DeclObjcAtDefsField = 12 => "DECL_OBJC_AT_DEFS_FIELD",
    DeclObjcClass = 13 => "DECL_OBJC_CLASS",
    DeclObjcForwardProtocol = 14 => "DECL_OBJC_FORWARD_PROTOCOL",
    DeclObjcCategory = 15 => "DECL_OBJC_CATEGORY",
    DeclObjcCategoryImpl = 16 => "DECL_OBJC_CATEGORY_IMPL",
    DeclObjcImplementation = 17 => "DECL_OBJC_IMPLEMENTATION",
    DeclObjcCompatibleAlias = 18 => "DECL_OBJC_COMPATIBLE_ALIAS",
    DeclObjcProperty = 19 => "DECL_OBJC_PROPERTY",
    DeclObjcPropertyImpl = 20 => "DECL_OBJC_PROPERTY_IMPL",
    DeclField = 21 => "DECL_FIELD",
    DeclVar = 22 => "DECL_VAR",
    DeclImplicitParam = 23 => "DECL_IMPLICIT_PARAM",
    DeclParmVar = 24 => "DECL_PARM_VAR",
    DeclFileScopeAsm = 25 => "DECL_FILE_SCOPE_ASM",
    DeclBlock = 26 => "DECL_BLOCK",
    /// Nested declaration IDs of a scope, in source order.
    DeclContextLexical = 27 => "DECL_CONTEXT_LEXICAL",
    /// Name lookup table of a scope: (name, count, IDs) groups.
    DeclContextVisible = 28 => "DECL_CONTEXT_VISIBLE",
    DeclNamespace = 29 => "DECL_NAMESPACE",
    DeclNamespaceAlias = 30 => "DECL_NAMESPACE_ALIAS",
    DeclUsing = 31 => "DECL_USING",
    DeclUsingShadow = 32 => "DECL_USING_SHADOW",
    DeclUsingDirective = 33 => "DECL_USING_DIRECTIVE",
    DeclUnresolvedUsingValue = 34 => "DECL_UNRESOLVED_USING_VALUE",
    DeclUnresolvedUsingTypename = 35 => "DECL_UNRESOLVED_USING_TYPENAME",
    DeclLinkageSpec = 36 => "DECL_LINKAGE_SPEC",
    DeclCxxRecord = 37 => "DECL_CXX_RECORD",
    DeclCxxMethod = 38 => "DECL_CXX_METHOD",
    DeclCxxConstructor = 39 => "DECL_CXX_CONSTRUCTOR",
    DeclCxxDestructor = 40 => "DECL_CXX_DESTRUCTOR",
    DeclCxxConversion = 41 => "DECL_CXX_CONVERSION",
    DeclAccessSpec = 42 => "DECL_ACCESS_SPEC",
    DeclClassTemplate = 43 => "DECL_CLASS_TEMPLATE",
    DeclFunctionTemplate = 44 => "DECL_FUNCTION_TEMPLATE",
    DeclTemplateTypeParm = 45 => "DECL_TEMPLATE_TYPE_PARM",

    /// Ends one statement tree.
    StmtStop = 60 => "STMT_STOP",
    /// Statement written by the opaque statement serializer.
    StmtOpaque = 61 => "STMT_OPAQUE",

    /// Offset of every declaration, indexed by ID - 1.
    DeclOffsets = 70 => "DECL_OFFSETS",
    /// IDs a reader must load eagerly.
    RequiredDecls = 71 => "REQUIRED_DECLS",
}

impl RecordCode {
    /// Convert from a raw field value.
    pub fn from_u64(v: u64) -> Option<Self> {
        u8::try_from(v).ok().and_then(Self::from_u8)
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self as u64
    }

    /// Whether this is a primary declaration record.
    pub fn is_decl(self) -> bool {
        let v = self as u8;
        (2..=45).contains(&v) && !self.is_context_block()
    }

    pub fn is_context_block(self) -> bool {
        matches!(self, Self::DeclContextLexical | Self::DeclContextVisible)
    }
}
