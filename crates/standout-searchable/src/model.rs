//! Host record types that declare their own search configuration.

use crate::fields::FieldList;
use crate::interceptor::Interceptors;
use crate::target::FilterTarget;

/// A record type that can be filtered from request parameters.
///
/// This is the capability a host model provides to
/// [`Searchable::for_model`](crate::Searchable::for_model): which fields are
/// searchable, which are not, and which fields it filters itself.
///
/// # Example
///
/// ```
/// use standout_searchable::{FieldList, Filter, FilterTarget, Interceptors, SearchableModel};
///
/// struct Post;
///
/// impl SearchableModel for Post {
///     type Query = Filter;
///
///     fn searchable_fields() -> Option<FieldList> {
///         Some(FieldList::new(["title", "author:name"]))
///     }
///
///     fn register_interceptors(interceptors: &mut Interceptors<Filter>) {
///         interceptors.register("title", |query, constraint, mode| {
///             match constraint.value().as_single() {
///                 Some(title) => {
///                     query.where_op(mode, "slug", constraint.operator(), &title.to_lowercase());
///                     true
///                 }
///                 None => false,
///             }
///         });
///     }
/// }
/// ```
pub trait SearchableModel {
    /// The query type constraints are applied to.
    type Query: FilterTarget;

    /// Allow-list of searchable fields; `*` allows all.
    ///
    /// Returning `None` means the model has no allow-list; it must then
    /// provide a deny-list.
    fn searchable_fields() -> Option<FieldList>;

    /// Deny-list of fields that are never searchable; `*` denies all.
    fn not_searchable_fields() -> Option<FieldList> {
        None
    }

    /// Registers the model's per-field interceptors.
    fn register_interceptors(_interceptors: &mut Interceptors<Self::Query>) {}
}
