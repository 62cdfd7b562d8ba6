use blueprint_core::TypeTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFamily {
    Text,
    Integer,
    Floating,
    Boolean,
    Temporal,
    Decimal,
}

/// A Java type name plus the import it needs, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaType {
    pub name: &'static str,
    pub import: Option<&'static str>,
    pub family: TypeFamily,
}

impl JavaType {
    const fn lang(name: &'static str, family: TypeFamily) -> Self {
        Self {
            name,
            import: None,
            family,
        }
    }

    const fn imported(name: &'static str, import: &'static str, family: TypeFamily) -> Self {
        Self {
            name,
            import: Some(import),
            family,
        }
    }

    /// Only integer-width primary keys get `@GeneratedValue`.
    pub fn is_integer(&self) -> bool {
        self.family == TypeFamily::Integer
    }

    pub fn is_text(&self) -> bool {
        self.family == TypeFamily::Text
    }
}

/// Map an attribute tag to its Java type. Unknown tags degrade to `String`.
pub const fn map_type(tag: TypeTag) -> JavaType {
    match tag {
        TypeTag::String | TypeTag::Unknown => JavaType::lang("String", TypeFamily::Text),
        TypeTag::Int => JavaType::lang("Integer", TypeFamily::Integer),
        TypeTag::Long => JavaType::lang("Long", TypeFamily::Integer),
        TypeTag::Boolean => JavaType::lang("Boolean", TypeFamily::Boolean),
        TypeTag::Float => JavaType::lang("Float", TypeFamily::Floating),
        TypeTag::Double => JavaType::lang("Double", TypeFamily::Floating),
        TypeTag::Date => JavaType::imported("LocalDate", "java.time.LocalDate", TypeFamily::Temporal),
        TypeTag::Datetime => {
            JavaType::imported("LocalDateTime", "java.time.LocalDateTime", TypeFamily::Temporal)
        }
        TypeTag::Decimal => {
            JavaType::imported("BigDecimal", "java.math.BigDecimal", TypeFamily::Decimal)
        }
    }
}

/// Type of the surrogate key used when a class flags no primary key.
pub const SURROGATE_KEY: JavaType = JavaType::lang("Long", TypeFamily::Integer);
