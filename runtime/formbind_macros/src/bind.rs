use std::collections::BTreeMap;

use convert_case::{Case, Casing};
use darling::{
    FromDeriveInput, FromField, FromMeta,
    ast::{Data, Style},
    util::{Flag, Ignored},
};
use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::{DeriveInput, Ident, Type, ext::IdentExt, parse_macro_input, spanned::Spanned};

const OPTIONS_TAG: &str = "form_options";
const FILTER_TAG: &str = "form_filter";

#[derive(FromDeriveInput)]
#[darling(attributes(bind), supports(struct_any))]
struct BindInput {
    ident: Ident,
    generics: syn::Generics,
    data: Data<Ignored, BindField>,
    rename_all: Option<RenameRule>,
    from_conversion: Flag,
}

#[derive(FromField)]
#[darling(attributes(bind))]
struct BindField {
    ident: Option<Ident>,
    ty: Type,
    vis: syn::Visibility,
    skip: Flag,
    rename: Option<String>,
    filter: Option<String>,
    options: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum RenameRule {
    Lower,
    Upper,
    Camel,
    Pascal,
    Snake,
    ScreamingSnake,
    Kebab,
}

impl RenameRule {
    fn apply(self, field: &str) -> String {
        match self {
            RenameRule::Lower => field.to_ascii_lowercase(),
            RenameRule::Upper => field.to_ascii_uppercase(),
            RenameRule::Camel => field.to_case(Case::Camel),
            RenameRule::Pascal => field.to_case(Case::Pascal),
            RenameRule::Snake => field.to_case(Case::Snake),
            RenameRule::ScreamingSnake => field.to_case(Case::Constant),
            RenameRule::Kebab => field.to_case(Case::Kebab),
        }
    }
}

impl FromMeta for RenameRule {
    fn from_string(value: &str) -> darling::Result<Self> {
        let rule = match value {
            "lowercase" => RenameRule::Lower,
            "UPPERCASE" => RenameRule::Upper,
            "camelCase" => RenameRule::Camel,
            "PascalCase" => RenameRule::Pascal,
            "snake_case" => RenameRule::Snake,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnake,
            "kebab-case" => RenameRule::Kebab,
            _ => return Err(darling::Error::unknown_value(value)),
        };
        Ok(rule)
    }
}

pub(super) fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match _derive_bind(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into(),
    }
}

fn _derive_bind(input: DeriveInput) -> Result<proc_macro2::TokenStream, darling::Error> {
    let input = BindInput::from_derive_input(&input)?;
    reject_invalid_inputs(&input)?;

    let struct_ident = &input.ident;
    let struct_name = struct_ident.unraw().to_string();
    let Data::Struct(fields) = &input.data else {
        return Err(darling::Error::unsupported_shape("enum").with_span(struct_ident));
    };

    let bind_struct = match fields.style {
        Style::Struct => Some(bind_struct_impl(&input, &fields.fields)?),
        Style::Tuple | Style::Unit => {
            if !input.from_conversion.is_present() {
                return Err(darling::Error::custom(format!(
                    "`#[derive(Bind)]` can only be applied to tuple or unit structs that implement `FromConversion`, such as `{struct_ident}`.\n\n\
                    help: Add `#[bind(from_conversion)]` to `{struct_ident}` and implement `formbind::FromConversion` for it.",
                ))
                .with_span(struct_ident));
            }
            None
        }
    };

    let as_struct_mut = bind_struct.is_some().then(|| {
        quote! {
            fn as_struct_mut(&mut self) -> ::std::option::Option<&mut dyn ::formbind::BindStruct> {
                ::std::option::Option::Some(self)
            }
        }
    });
    let assign = if input.from_conversion.is_present() {
        quote! {
            leaf.convert(self, #struct_name, values);
        }
    } else {
        quote! {
            leaf.report(
                values.first().map(::std::string::String::as_str),
                ::formbind::FieldError::NoConversion { type_name: #struct_name },
            );
        }
    };

    Ok(quote! {
        impl ::formbind::Bindable for #struct_ident {
            fn kind(&self) -> ::formbind::Kind {
                ::formbind::Kind::Struct
            }

            fn type_name(&self) -> &'static str {
                #struct_name
            }

            #as_struct_mut

            fn assign(&mut self, values: &[::std::string::String], leaf: &::formbind::Leaf<'_>) {
                #assign
            }
        }

        #bind_struct
    })
}

fn bind_struct_impl(
    input: &BindInput,
    fields: &[BindField],
) -> Result<proc_macro2::TokenStream, darling::Error> {
    let struct_ident = &input.ident;
    let struct_name = struct_ident.unraw().to_string();

    let mut errors = darling::Error::accumulator();
    // Bound name -> the field that claimed it first.
    let mut bound_names: BTreeMap<String, &Ident> = BTreeMap::new();
    let mut descriptors = Vec::with_capacity(fields.len());
    let mut arms = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let ident_name = ident.unraw().to_string();
        let name = match (&field.rename, input.rename_all) {
            (Some(rename), _) => rename.clone(),
            (None, Some(rule)) => rule.apply(&ident_name),
            (None, None) => ident_name.clone(),
        };
        let name = lowercase_first(&name);
        if name.is_empty() {
            errors.push(
                darling::Error::custom("A field can't be bound under an empty name.")
                    .with_span(ident),
            );
            continue;
        }
        if let Some(previous) = bound_names.insert(name.clone(), ident) {
            errors.push(
                darling::Error::custom(format!(
                    "`{ident}` and `{previous}` are both bound as `{name}`.\n\n\
                    help: Use `#[bind(rename = \"...\")]` to give one of them a different name.",
                ))
                .with_span(ident),
            );
            continue;
        }
        if field.skip.is_present() && field.options.is_some() {
            errors.push(
                darling::Error::custom(format!(
                    "`#[bind(skip)]` and `#[bind(options = \"...\")]` can't be used together on `{ident}`.",
                ))
                .with_span(ident),
            );
            continue;
        }

        let settable = matches!(field.vis, syn::Visibility::Public(_)) && !field.skip.is_present();
        let mut tags = Vec::new();
        if field.skip.is_present() {
            tags.push(quote! { (#OPTIONS_TAG, "-") });
        }
        if let Some(options) = &field.options {
            tags.push(quote! { (#OPTIONS_TAG, #options) });
        }
        if let Some(filter) = &field.filter {
            tags.push(quote! { (#FILTER_TAG, #filter) });
        }

        let index = descriptors.len();
        descriptors.push(quote! {
            ::formbind::FieldDescriptor::new(#name, #ident_name, #settable, &[#(#tags),*])
        });
        arms.push(if settable {
            let ty_span = field.ty.span();
            let value = quote_spanned! { ty_span => &mut self.#ident };
            quote! {
                #name => ::formbind::FieldLookup::Settable {
                    value: #value,
                    descriptor: &fields[#index],
                }
            }
        } else {
            quote! {
                #name => ::formbind::FieldLookup::Unsettable {
                    descriptor: &fields[#index],
                }
            }
        });
    }
    errors.finish()?;

    Ok(quote! {
        impl ::formbind::BindStruct for #struct_ident {
            fn struct_name(&self) -> &'static str {
                #struct_name
            }

            fn fields(&self) -> &'static [::formbind::FieldDescriptor] {
                const FIELDS: &[::formbind::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            #[allow(unused_variables)]
            fn field_mut(&mut self, name: &str) -> ::formbind::FieldLookup<'_> {
                let fields = <Self as ::formbind::BindStruct>::fields(&*self);
                match name {
                    #(#arms,)*
                    _ => ::formbind::FieldLookup::Missing,
                }
            }
        }
    })
}

fn reject_invalid_inputs(input: &BindInput) -> Result<(), darling::Error> {
    let struct_ident = &input.ident;
    if let Some(generic) = input.generics.type_params().next() {
        return Err(darling::Error::custom(format!(
            "`#[derive(Bind)]` can't be applied to structs with generic type parameters, such as `{struct_ident}`.\n\n\
            help: Consider using concrete types instead. Alternatively, implement `formbind::Bindable` by hand.",
        ))
        .with_span(&generic.ident));
    }
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(darling::Error::custom(format!(
            "`#[derive(Bind)]` can't be applied to structs with generic lifetimes, such as `{struct_ident}`.\n\n\
            help: Bind targets must own their data.",
        ))
        .with_span(&lifetime.lifetime.ident));
    }
    if let Some(param) = input.generics.const_params().next() {
        return Err(darling::Error::custom(format!(
            "`#[derive(Bind)]` can't be applied to structs with const generic parameters, such as `{struct_ident}`.",
        ))
        .with_span(&param.ident));
    }
    Ok(())
}

/// Form keys are matched after lowercasing their first letter: bound names get the same treatment.
fn lowercase_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
