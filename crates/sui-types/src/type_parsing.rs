//! Move type string parsing.
//!
//! Type strings reach us from three places: object content (`0x2::coin::Coin<0x2::sui::SUI>`),
//! object changes (`objectType`) and `std::type_name::TypeName` values stored in
//! shop objects, which carry no `0x` prefix and a fully padded address
//! (`0000…0002::sui::SUI`). [`normalize_type_name`] folds all of them into one
//! spelling so they can be compared and used as map keys.

use move_core_types::account_address::AccountAddress;
use move_core_types::identifier::Identifier;
use move_core_types::language_storage::{StructTag, TypeTag};

use crate::address::{is_sui_framework, normalize_address};

const PRIMITIVES: [&str; 9] = [
    "bool", "u8", "u16", "u32", "u64", "u128", "u256", "address", "signer",
];

/// A struct type split into its parts, with the address normalized and the
/// type parameters kept as (normalized) strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructTypeName {
    pub address: String,
    pub module: String,
    pub name: String,
    pub type_params: Vec<String>,
}

impl StructTypeName {
    /// `address::module::name` without type parameters.
    pub fn base(&self) -> String {
        format!("{}::{}::{}", self.address, self.module, self.name)
    }

    /// `module::name`, handy for suffix matching against artifact types.
    pub fn module_and_name(&self) -> String {
        format!("{}::{}", self.module, self.name)
    }
}

impl std::fmt::Display for StructTypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base())?;
        if !self.type_params.is_empty() {
            write!(f, "<{}>", self.type_params.join(", "))?;
        }
        Ok(())
    }
}

/// Parse a struct type string into its parts.
///
/// Returns `None` for primitives, vectors, and malformed strings.
///
/// ```
/// use sui_shop_types::type_parsing::parse_struct_type;
///
/// let t = parse_struct_type("0x2::coin::Coin<0x2::sui::SUI>").unwrap();
/// assert_eq!(t.module, "coin");
/// assert_eq!(t.name, "Coin");
/// assert_eq!(t.type_params.len(), 1);
/// ```
pub fn parse_struct_type(type_str: &str) -> Option<StructTypeName> {
    let type_str = type_str.trim();
    if type_str.starts_with("vector<") || PRIMITIVES.contains(&type_str) {
        return None;
    }

    let (base, params) = match type_str.find('<') {
        Some(pos) => {
            let inner = type_str[pos..].strip_prefix('<')?.strip_suffix('>')?;
            (&type_str[..pos], split_type_params(inner))
        }
        None => (type_str, Vec::new()),
    };

    let parts: Vec<&str> = base.split("::").collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    let address_hex = parts[0]
        .strip_prefix("0x")
        .or_else(|| parts[0].strip_prefix("0X"))
        .unwrap_or(parts[0]);
    if !address_hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let mut type_params = Vec::with_capacity(params.len());
    for p in params {
        type_params.push(normalize_type_name(p)?);
    }

    Some(StructTypeName {
        address: normalize_address(parts[0]),
        module: parts[1].to_string(),
        name: parts[2].to_string(),
        type_params,
    })
}

/// Canonicalize a type string: addresses padded and `0x`-prefixed at every
/// nesting level, parameters separated by `", "`.
///
/// ```
/// use sui_shop_types::type_parsing::normalize_type_name;
///
/// assert_eq!(
///     normalize_type_name("0000000000000000000000000000000000000000000000000000000000000002::sui::SUI").unwrap(),
///     "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI",
/// );
/// ```
pub fn normalize_type_name(type_str: &str) -> Option<String> {
    let type_str = type_str.trim();
    if PRIMITIVES.contains(&type_str) {
        return Some(type_str.to_string());
    }
    if let Some(inner) = type_str
        .strip_prefix("vector<")
        .and_then(|s| s.strip_suffix('>'))
    {
        return Some(format!("vector<{}>", normalize_type_name(inner)?));
    }
    parse_struct_type(type_str).map(|t| t.to_string())
}

/// Package ID a type was defined in.
///
/// Dynamic-field wrappers (`0x2::dynamic_field::Field<K, V>`) report the
/// package of their value type, since the wrapper itself always lives in `0x2`.
pub fn package_id_from_type(type_str: &str) -> Option<String> {
    let parsed = parse_struct_type(type_str)?;
    if is_dynamic_field_struct(&parsed) {
        if let Some(value_type) = parsed.type_params.get(1) {
            if let Some(inner) = parse_struct_type(value_type) {
                return Some(inner.address);
            }
        }
    }
    Some(parsed.address)
}

fn is_dynamic_field_struct(parsed: &StructTypeName) -> bool {
    is_sui_framework(&parsed.address)
        && (parsed.module == "dynamic_field" || parsed.module == "dynamic_object_field")
        && parsed.name == "Field"
}

/// True when the type is a `0x2::dynamic_field::Field<..>` (or the
/// dynamic-object-field variant) wrapper object.
pub fn is_dynamic_field_type(type_str: &str) -> bool {
    parse_struct_type(type_str)
        .map(|t| is_dynamic_field_struct(&t))
        .unwrap_or(false)
}

/// Value type `V` of a `Field<K, V>` wrapper.
pub fn dynamic_field_value_type(type_str: &str) -> Option<String> {
    let parsed = parse_struct_type(type_str)?;
    if !is_dynamic_field_struct(&parsed) {
        return None;
    }
    parsed.type_params.get(1).cloned()
}

/// Coin type `T` of a `0x2::coin::Coin<T>`.
pub fn coin_type_from_coin(type_str: &str) -> Option<String> {
    let parsed = parse_struct_type(type_str)?;
    if is_sui_framework(&parsed.address) && parsed.module == "coin" && parsed.name == "Coin" {
        parsed.type_params.into_iter().next()
    } else {
        None
    }
}

/// Whether `type_str` names `module::name` (e.g. `"shop::ItemListing"`),
/// regardless of the defining package or type parameters.
pub fn type_has_name(type_str: &str, module_and_name: &str) -> bool {
    parse_struct_type(type_str)
        .map(|t| t.module_and_name() == module_and_name)
        .unwrap_or(false)
}

/// Parse a Move type string into a TypeTag.
///
/// Supports primitives, `vector<T>` and struct types with type arguments.
/// Accepts `TypeName`-style addresses without the `0x` prefix.
pub fn parse_type_tag(type_str: &str) -> Option<TypeTag> {
    let type_str = type_str.trim();

    match type_str {
        "bool" => return Some(TypeTag::Bool),
        "u8" => return Some(TypeTag::U8),
        "u16" => return Some(TypeTag::U16),
        "u32" => return Some(TypeTag::U32),
        "u64" => return Some(TypeTag::U64),
        "u128" => return Some(TypeTag::U128),
        "u256" => return Some(TypeTag::U256),
        "address" => return Some(TypeTag::Address),
        "signer" => return Some(TypeTag::Signer),
        _ => {}
    }

    if let Some(inner) = type_str
        .strip_prefix("vector<")
        .and_then(|s| s.strip_suffix('>'))
    {
        return Some(TypeTag::Vector(Box::new(parse_type_tag(inner)?)));
    }

    let parsed = parse_struct_type(type_str)?;
    let address = AccountAddress::from_hex_literal(&parsed.address).ok()?;
    let module = Identifier::new(parsed.module).ok()?;
    let name = Identifier::new(parsed.name).ok()?;
    let type_params = parsed
        .type_params
        .iter()
        .map(|p| parse_type_tag(p))
        .collect::<Option<Vec<_>>>()?;

    Some(TypeTag::Struct(Box::new(StructTag {
        address,
        module,
        name,
        type_params,
    })))
}

/// Split type parameters respecting nested angle brackets.
///
/// Given "A, B<C, D>, E", returns ["A", "B<C, D>", "E"] by tracking bracket depth.
pub fn split_type_params(s: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                result.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < s.len() && !s[start..].trim().is_empty() {
        result.push(s[start..].trim());
    }

    result
}
