use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};

// Registered on the template engine, e.g. `{{ CLASS_NAME | snakecase }}`.
pub use self::camelcase as filter_camelcase;
pub use self::kebabcase as filter_kebabcase;
pub use self::pascalcase as filter_pascalcase;
pub use self::screamingsnakecase as filter_screamingsnakecase;
pub use self::snakecase as filter_snakecase;

pub fn camelcase(s: String) -> String {
    s.to_lower_camel_case()
}

pub fn pascalcase(s: String) -> String {
    s.to_pascal_case()
}

pub fn snakecase(s: String) -> String {
    s.to_snake_case()
}

pub fn kebabcase(s: String) -> String {
    s.to_kebab_case()
}

pub fn screamingsnakecase(s: String) -> String {
    s.to_shouty_snake_case()
}
