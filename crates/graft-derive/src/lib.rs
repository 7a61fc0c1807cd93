use proc_macro::TokenStream;

mod record;

/// Derive the static field registry and accessors for a record type.
///
/// Field attributes:
/// - `#[record(rename = "Name")]` registers the field under another name
/// - `#[record(preload = "foreignkey:A;primarykey:B")]` declares an association
/// - `#[record(column = "serial_number")]` overrides the external column name
/// - `#[record(tag(name = "key", value = "..."))]` attaches an arbitrary tag
/// - `#[record(skip)]` leaves the field out of the model
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input.into()).into()
}
