// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record support for user structs.

/// Implement [`Describe`](crate::native::Describe) and
/// [`Marshal`](crate::native::Marshal) for a struct with named fields.
///
/// Fields are listed in declaration order; that order becomes the
/// `field_<i>` order of the struct descriptor.
///
/// ```rust
/// use typewire::impl_record;
/// use typewire::native::{Describe, Marshal};
///
/// #[derive(Debug, PartialEq)]
/// struct Person {
///     name: String,
///     age: isize,
/// }
///
/// impl_record!(Person { name: String, age: isize });
///
/// let bob = Person { name: "Bob".into(), age: 36 };
/// let value = bob.to_value();
/// assert_eq!(Person::from_value(value).unwrap(), bob);
/// assert_eq!(Person::native_type().fields().map(|f| f.len()), Some(2));
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ident { $($field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::native::Describe for $ty {
            fn native_type() -> $crate::native::NativeType {
                $crate::native::NativeType::Struct(vec![
                    $($crate::native::FieldType::new(
                        stringify!($field),
                        <$fty as $crate::native::Describe>::native_type(),
                    )),*
                ])
            }
        }

        impl $crate::native::Marshal for $ty {
            fn to_value(&self) -> $crate::native::DynamicValue {
                $crate::native::DynamicValue::Struct(vec![
                    $((
                        stringify!($field).to_string(),
                        $crate::native::Marshal::to_value(&self.$field),
                    )),*
                ])
            }

            #[allow(unused_mut, unused_variables)]
            fn from_value(
                value: $crate::native::DynamicValue,
            ) -> ::std::result::Result<Self, $crate::native::ValueError> {
                let mut fields = $crate::native::StructFields::new(value)?;
                Ok(Self {
                    $($field: fields.take::<$fty>(stringify!($field))?),*
                })
            }
        }
    };
}
