mod component;
mod system;

use proc_macro::TokenStream;

#[proc_macro_derive(Component)]
pub fn derive_component(item: TokenStream) -> TokenStream {
    component::derive_component(item)
}

#[proc_macro_derive(System, attributes(members))]
pub fn derive_system(item: TokenStream) -> TokenStream {
    system::derive_system(item)
}
