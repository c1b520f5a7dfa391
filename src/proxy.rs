//! Compile-time substitute generation.
//!
//! [`mock_interface!`](crate::mock_interface) restates the members of a
//! trait and expands to three things:
//!
//! - a substitute struct holding a [`crate::Dispatcher`] and implementing
//!   the trait by forwarding every member to [`crate::Dispatcher::invoke`];
//! - a module of [`crate::Member`] tokens, one per member, named after it;
//! - a [`crate::Mockable`] impl for `dyn Trait` listing the members and
//!   returning the substitute factory.
//!
//! ```
//! use litmock::{mock_interface, Mock};
//!
//! pub trait Greeter: Send + Sync {
//!     fn greet(&self, name: &str) -> String;
//!     fn greetings_sent(&self) -> u32;
//! }
//!
//! mock_interface! {
//!     pub Greeter => GreeterProxy, members greeter {
//!         method greet(&self, name: &str) -> String;
//!         property greetings_sent(&self) -> u32;
//!     }
//! }
//!
//! fn main() {
//!     let mock = Mock::of::<dyn Greeter>()
//!         .setup(greeter::greet, "hi".to_string())
//!         .build()
//!         .unwrap();
//!     assert_eq!(mock.object().greet("ada"), "hi");
//!     assert_eq!(mock.object().greetings_sent(), 0);
//!     mock.verify(greeter::greet)
//!         .with_argument::<String>(0)
//!         .matching(|n| n == "ada")
//!         .unwrap();
//! }
//! ```

/// Generate the substitute, member tokens and [`crate::Mockable`] impl of a
/// trait. See the [module documentation](crate::proxy).
///
/// Each member is declared as `method` or `property`, followed by the
/// receiver `&self`, named parameters and an optional return type. The
/// declaration must match the trait exactly.
#[macro_export]
macro_rules! mock_interface {
    (
        $vis:vis $trait:ident => $proxy:ident, members $module:ident {
            $(
                $kind:ident $name:ident (&self $(, $arg:ident : $ty:ty)* $(,)?) $(-> $ret:ty)?;
            )*
        }
    ) => {
        #[derive(Debug, Clone)]
        $vis struct $proxy {
            dispatcher: $crate::Dispatcher<dyn $trait>,
        }

        impl $proxy {
            pub fn dispatcher(&self) -> &$crate::Dispatcher<dyn $trait> {
                &self.dispatcher
            }
        }

        #[allow(non_upper_case_globals)]
        $vis mod $module {
            #[allow(unused_imports)]
            use super::*;

            $(
                pub const $name: $crate::Member<dyn $trait, $crate::__ret_ty!($($ret)?)> =
                    $crate::Member::$kind(
                        stringify!($trait),
                        stringify!($name),
                        stringify!(fn $name(&self $(, $arg: $ty)*) $(-> $ret)?),
                    );
            )*
        }

        impl $trait for $proxy {
            $(
                fn $name(&self $(, $arg: $ty)*) $(-> $ret)? {
                    self.dispatcher.invoke(
                        $module::$name,
                        $crate::Arguments::new()$(.with_arg(&$arg))*,
                    )
                }
            )*
        }

        impl $crate::Mockable for dyn $trait {
            const TYPE_NAME: &'static str = stringify!($trait);

            fn members() -> &'static [$crate::MemberDescriptor] {
                const MEMBERS: &[$crate::MemberDescriptor] = &[
                    $(
                        $crate::MemberDescriptor {
                            id: $module::$name.id(),
                            kind: $module::$name.kind(),
                            name: stringify!($name),
                            signature: $module::$name.signature(),
                            params: &[$((stringify!($arg), stringify!($ty))),*],
                            returns: $crate::__ret_name!($($ret)?),
                        },
                    )*
                ];
                MEMBERS
            }

            fn proxy_factory() -> ::std::option::Option<$crate::ProxyFactory<Self>> {
                fn build(dispatcher: $crate::Dispatcher<dyn $trait>) -> ::std::sync::Arc<dyn $trait> {
                    ::std::sync::Arc::new($proxy { dispatcher })
                }
                ::std::option::Option::Some(build)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ret_ty {
    () => { () };
    ($ret:ty) => { $ret };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ret_name {
    () => { "()" };
    ($ret:ty) => { stringify!($ret) };
}
