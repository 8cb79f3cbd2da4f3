use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Meta};

fn has_config_field(data: &syn::Data) -> (bool, bool) {
    match data {
        syn::Data::Struct(syn::DataStruct { fields, .. }) => fields
            .iter()
            .find(|field| {
                field
                    .ident
                    .as_ref()
                    .map(|ident| ident == "config")
                    .unwrap_or(false)
            })
            .map(|field| {
                let no_change = field
                    .attrs
                    .iter()
                    .any(|attr| matches!(&attr.meta, Meta::Path(path) if path.is_ident("no_change")));
                (true, no_change)
            })
            .unwrap_or((false, false)),
        _ => (false, false),
    }
}

/// Derives `ModulationProperty`, `Datagram` and `HeaderDatagram` for a modulation.
///
/// The struct must have a `config: SamplingConfig` field and implement `Modulation`.
/// Mark the field with `#[no_change]` to suppress the generated `with_sampling_config`.
#[proc_macro_derive(Modulation, attributes(no_change))]
pub fn modulation_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    let (has_config, no_change) = has_config_field(&input.data);
    if !has_config {
        return syn::Error::new_spanned(
            &input.ident,
            "Modulation requires a `config: SamplingConfig` field",
        )
        .to_compile_error()
        .into();
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut datagram_generics = input.generics.clone();
    datagram_generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: Modulation));
    let (datagram_impl_generics, _, datagram_where_clause) = datagram_generics.split_for_impl();

    let config_setter = if no_change {
        quote! {}
    } else {
        quote! {
            impl #impl_generics #name #ty_generics #where_clause {
                /// Set sampling configuration
                ///
                /// # Arguments
                ///
                /// * `config` - Sampling configuration
                ///
                #[allow(clippy::needless_update)]
                pub fn with_sampling_config(self, config: SamplingConfig) -> Self {
                    Self { config, ..self }
                }
            }
        }
    };

    let gen = quote! {
        impl #impl_generics ModulationProperty for #name #ty_generics #where_clause {
            fn sampling_config(&self) -> SamplingConfig {
                self.config
            }
        }

        #config_setter

        impl #datagram_impl_generics Datagram for #name #ty_generics #datagram_where_clause {
            type O1 = ModulationOp;
            type O2 = NullOp;

            fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
                let freq_div = self.config.frequency_division();
                Ok((Self::O1::new(self.calc()?, freq_div), Self::O2::default()))
            }

            fn timeout(&self) -> Option<std::time::Duration> {
                Some(DEFAULT_TIMEOUT)
            }
        }

        impl #datagram_impl_generics HeaderDatagram for #name #ty_generics #datagram_where_clause {}
    };
    gen.into()
}

/// Derives `Datagram` and `BodyDatagram` for a type implementing `Gain`.
#[proc_macro_derive(Gain)]
pub fn gain_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    let name = &input.ident;
    let mut generics = input.generics.clone();
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: Gain));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let gen = quote! {
        impl #impl_generics Datagram for #name #ty_generics #where_clause {
            type O1 = NullOp;
            type O2 = GainOp<Self>;

            fn operation(self) -> Result<(Self::O1, Self::O2), AUPAInternalError> {
                Ok((Self::O1::default(), Self::O2::new(self)))
            }
        }

        impl #impl_generics BodyDatagram for #name #ty_generics #where_clause {}
    };
    gen.into()
}
