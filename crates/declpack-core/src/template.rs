//! Template payloads and exact-width integer values.

use crate::{DeclIdx, SourceLocation, SourceRange, StmtHandle, TemplateSpecializationKind, TypeHandle, TypeSourceInfo};

/// Arbitrary-precision integer with an explicit bit width and signedness.
///
/// Stored as little-endian 64-bit words; bits above `bit_width` are zero.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ApsInt {
    pub bit_width: u32,
    pub is_unsigned: bool,
    pub words: Vec<u64>,
}

impl ApsInt {
    /// Signed value truncated (two's complement) to `bit_width` bits.
    pub fn from_i64(value: i64, bit_width: u32) -> Self {
        let fill = if value < 0 { u64::MAX } else { 0 };
        let mut words = vec![fill; words_for(bit_width)];
        if let Some(first) = words.first_mut() {
            *first = value as u64;
        }
        let mut int = Self {
            bit_width,
            is_unsigned: false,
            words,
        };
        int.clear_unused_bits();
        int
    }

    pub fn from_u64(value: u64, bit_width: u32) -> Self {
        let mut words = vec![0; words_for(bit_width)];
        if let Some(first) = words.first_mut() {
            *first = value;
        }
        let mut int = Self {
            bit_width,
            is_unsigned: true,
            words,
        };
        int.clear_unused_bits();
        int
    }

    #[inline]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    fn clear_unused_bits(&mut self) {
        let used = self.bit_width % 64;
        if used != 0
            && let Some(last) = self.words.last_mut()
        {
            *last &= (1u64 << used) - 1;
        }
    }
}

fn words_for(bit_width: u32) -> usize {
    (bit_width as usize).div_ceil(64).max(1)
}

/// A resolved template argument.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TemplateArgument {
    Null,
    Type(TypeHandle),
    Declaration(DeclIdx),
    Integral { value: ApsInt, ty: TypeHandle },
    Template(DeclIdx),
    Expression(StmtHandle),
    Pack(Vec<TemplateArgument>),
}

impl TemplateArgument {
    pub fn kind_tag(&self) -> u64 {
        match self {
            Self::Null => 0,
            Self::Type(_) => 1,
            Self::Declaration(_) => 2,
            Self::Integral { .. } => 3,
            Self::Template(_) => 4,
            Self::Expression(_) => 5,
            Self::Pack(_) => 6,
        }
    }
}

/// Source information attached to a template argument as written.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TemplateArgumentLocInfo {
    None,
    Expression(StmtHandle),
    TypeSourceInfo(Option<TypeSourceInfo>),
    Template {
        qualifier_range: SourceRange,
        name_loc: SourceLocation,
    },
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TemplateArgumentLoc {
    pub argument: TemplateArgument,
    pub info: TemplateArgumentLocInfo,
}

/// Explicit template arguments exactly as the user wrote them.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct TemplateArgumentListInfo {
    pub args: Vec<TemplateArgumentLoc>,
    pub langle_loc: SourceLocation,
    pub rangle_loc: SourceLocation,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct TemplateParameterList {
    pub template_loc: SourceLocation,
    pub langle_loc: SourceLocation,
    pub rangle_loc: SourceLocation,
    pub params: Vec<DeclIdx>,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MemberSpecializationInfo {
    pub instantiated_from: DeclIdx,
    pub kind: TemplateSpecializationKind,
    pub point_of_instantiation: SourceLocation,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FunctionSpecializationInfo {
    pub template: DeclIdx,
    pub kind: TemplateSpecializationKind,
    pub args: Vec<TemplateArgument>,
    pub args_as_written: Option<TemplateArgumentListInfo>,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct DependentSpecializationInfo {
    pub templates: Vec<DeclIdx>,
    pub args: Vec<TemplateArgumentLoc>,
}

/// Template role of a function declaration.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum FunctionTemplateKind {
    #[default]
    NonTemplate,
    /// The pattern of a function template (the described template).
    Primary(DeclIdx),
    /// Member of a class template specialization.
    MemberSpecialization(MemberSpecializationInfo),
    /// Specialization of a function template.
    Specialization(FunctionSpecializationInfo),
    /// Friend specialization whose template is still dependent.
    DependentSpecialization(DependentSpecializationInfo),
}

impl FunctionTemplateKind {
    pub fn kind_tag(&self) -> u64 {
        match self {
            Self::NonTemplate => 0,
            Self::Primary(_) => 1,
            Self::MemberSpecialization(_) => 2,
            Self::Specialization(_) => 3,
            Self::DependentSpecialization(_) => 4,
        }
    }
}
