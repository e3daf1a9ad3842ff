use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;

/// Turn a function into a `#[test]` that runs inside an active mock session.
///
/// An optional argument names a `fn(&mut roads_mock::MockConfiguration)` that
/// registers fixtures before the body runs. The test fails when the session
/// reports an unmatched request.
#[proc_macro_attribute]
pub fn mock_test(attrs: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as syn::ItemFn);
    let args = syn::parse_macro_input!(attrs as syn::AttributeArgs);

    let attributes = &input.attrs;
    let signature = &input.sig;
    let block = &input.block;

    if let Err(error) = validate_signature(signature) {
        return error.into();
    }

    let configure = match configuration_function(&args) {
        Ok(Some(function_path)) => quote! { #function_path(&mut __roads_mock_configuration); },
        Ok(None) => quote! {},
        Err(error) => return error.into(),
    };

    let output = quote! {
        #(#attributes)*
        #[test]
        #signature {
            #[allow(unused_mut)]
            let mut __roads_mock_configuration = roads_mock::MockConfiguration::new();
            #configure
            let __roads_mock_session = match roads_mock::activate(__roads_mock_configuration) {
                Ok(session) => session,
                Err(e) => panic!("roads-mock error: {}", e),
            };

            (|| #block)();

            if let Err(e) = __roads_mock_session.finish() {
                panic!("roads-mock error: {}", e);
            }
        }
    };

    TokenStream::from(output)
}

fn validate_signature(signature: &syn::Signature) -> Result<(), proc_macro2::TokenStream> {
    if !signature.inputs.is_empty() {
        let span = signature.inputs.span();
        return Err(quote_spanned! {span=>
            compile_error!("A mock test can't take arguments!");
        });
    }

    Ok(())
}

fn configuration_function(
    args: &[syn::NestedMeta],
) -> Result<Option<&syn::Path>, proc_macro2::TokenStream> {
    match args {
        [] => Ok(None),
        [syn::NestedMeta::Meta(syn::Meta::Path(function_path))] => Ok(Some(function_path)),
        [argument] => {
            let span = argument.span();
            Err(quote_spanned! {span=>
                compile_error!("The argument should be a configuration function!");
            })
        }
        [_, extra, ..] => {
            let span = extra.span();
            Err(quote_spanned! {span=>
                compile_error!("Only a configuration function may be passed to the macro");
            })
        }
    }
}
