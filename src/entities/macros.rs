//! Macros for reducing boilerplate when defining records
//!
//! Every record struct carries `id`, `created_at` and `updated_at`; these
//! macros generate the repetitive trait implementations around them.

/// Implement [`Record`](crate::core::entity::Record) for a struct with the
/// standard identity fields
///
/// Extra trait items (visibility, text fields, indexes, creation hook) go in
/// the optional trailing block.
///
/// # Example
/// ```rust,ignore
/// impl_record!(HeroSlide, "heroslides", "Hero slide", {
///     fn visibility() -> Option<Visibility> {
///         Some(Visibility::flag("isActive", true))
///     }
/// });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($type:ident, $collection:expr, $label:expr $(, { $($items:tt)* })? $(,)?) => {
        impl $crate::core::entity::Record for $type {
            const COLLECTION: &'static str = $collection;
            const LABEL: &'static str = $label;

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            $( $($items)* )?
        }
    };
}

/// Mark a record as manually ordered through its `order: i64` field
#[macro_export]
macro_rules! impl_ordered {
    ($type:ident) => {
        impl $crate::core::entity::Ordered for $type {
            fn order(&self) -> i64 {
                self.order
            }
        }
    };
}
