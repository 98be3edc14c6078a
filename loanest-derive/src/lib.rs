use proc_macro::TokenStream;
use proc_macro2::TokenTree;
use quote::quote;
use syn::{
    parse_macro_input, token, Attribute, Data, DeriveInput, Field, Fields, Lit, LitStr, Meta,
    Token, Type,
};

/// Derive CSV column metadata for a scenario input row.
///
/// Each named field becomes a `CsvColumn` carrying:
/// - the column name (`#[serde(rename = "...")]` wins over the field name)
/// - whether the column must be present (neither `Option<T>` nor `#[serde(default)]`)
/// - the field's doc comment as its description
///
/// Generates `csv_columns() -> &'static [CsvColumn]` and `csv_header() -> String`.
/// `CsvColumn` must be in scope at the derive site.
#[proc_macro_derive(CsvColumns, attributes(serde))]
pub fn derive_csv_columns(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "CsvColumns needs named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "CsvColumns can only be derived for structs")
                .to_compile_error()
                .into()
        }
    };

    let columns = match fields.iter().map(Column::from_field).collect::<syn::Result<Vec<_>>>() {
        Ok(columns) => columns,
        Err(err) => return err.to_compile_error().into(),
    };

    let header = columns
        .iter()
        .map(|column| column.name.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let entries = columns.iter().map(|column| {
        let Column {
            name: column_name,
            required,
            description,
        } = column;
        quote! {
            CsvColumn {
                name: #column_name,
                required: #required,
                description: #description,
            }
        }
    });

    let expanded = quote! {
        impl #name {
            pub fn csv_columns() -> &'static [CsvColumn] {
                static COLUMNS: &[CsvColumn] = &[
                    #(#entries),*
                ];
                COLUMNS
            }

            pub fn csv_header() -> String {
                #header.to_string()
            }
        }
    };

    TokenStream::from(expanded)
}

struct Column {
    name: String,
    required: bool,
    description: String,
}

impl Column {
    fn from_field(field: &Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "CsvColumns needs named fields"))?;
        let serde = SerdeField::from_attrs(&field.attrs)?;
        Ok(Column {
            name: serde.rename.unwrap_or_else(|| ident.to_string()),
            required: !serde.has_default && !is_option(&field.ty),
            description: doc_text(&field.attrs),
        })
    }
}

#[derive(Default)]
struct SerdeField {
    rename: Option<String>,
    has_default: bool,
}

impl SerdeField {
    fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut field = SerdeField::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                    let value: LitStr = meta.value()?.parse()?;
                    field.rename = Some(value.value());
                } else if meta.path.is_ident("default") {
                    field.has_default = true;
                    if meta.input.peek(Token![=]) {
                        let _: LitStr = meta.value()?.parse()?;
                    }
                } else if meta.input.peek(Token![=]) {
                    let _: syn::Expr = meta.value()?.parse()?;
                } else if meta.input.peek(token::Paren) {
                    let _: TokenTree = meta.input.parse()?;
                }
                Ok(())
            })?;
        }
        Ok(field)
    }
}

fn doc_text(attrs: &[Attribute]) -> String {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: Lit::Str(text), ..
                }) => Some(text.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();
    lines.join(" ")
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn columns(input: DeriveInput) -> syn::Result<Vec<Column>> {
        match input.data {
            Data::Struct(data) => data.fields.iter().map(Column::from_field).collect(),
            _ => panic!("test input must be a struct"),
        }
    }

    #[test]
    fn rename_default_and_option() {
        let columns = columns(parse_quote! {
            struct Row {
                /// Row label
                id: String,
                #[serde(rename = "price")]
                sales_price: String,
                #[serde(default)]
                homestead: bool,
                #[serde(default = "default_rate", rename = "rate")]
                interest_rate: String,
                attorney: Option<String>,
            }
        })
        .unwrap();

        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "price", "homestead", "rate", "attorney"]);
        let required: Vec<_> = columns.iter().map(|c| c.required).collect();
        assert_eq!(required, [true, true, false, false, false]);
        assert_eq!(columns[0].description, "Row label");
        assert_eq!(columns[1].description, "");
    }

    #[test]
    fn other_serde_keys_are_ignored() {
        let columns = columns(parse_quote! {
            struct Row {
                #[serde(skip_serializing_if = "Option::is_none", alias = "when")]
                closing_date: Option<String>,
                #[serde(rename(serialize = "out"), flatten)]
                extra: String,
            }
        })
        .unwrap();

        assert_eq!(columns[0].name, "closing_date");
        assert!(!columns[0].required);
        assert_eq!(columns[1].name, "extra");
        assert!(columns[1].required);
    }

    #[test]
    fn malformed_rename_is_an_error() {
        let result = columns(parse_quote! {
            struct Row {
                #[serde(rename = 5)]
                id: String,
            }
        });
        assert!(result.is_err());
    }
}
