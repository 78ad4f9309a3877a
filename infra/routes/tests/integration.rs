pub mod fixtures;

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use coord_route_hub::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_screen_example() {
        let resolver = screen_resolver();

        let title: String = resolver.resolve(Screen::Profile).unwrap();
        assert_eq!(title, "Profile");

        let err = resolver.resolve::<_, String>(Screen::Settings).unwrap_err();
        assert!(matches!(err, ResolveError::ProducerReturnedNil { .. }));

        let err = resolver.resolve::<_, i64>(Screen::Profile).unwrap_err();
        assert!(matches!(err, ResolveError::TypeMismatch { expected: "i64", .. }));

        assert!(resolver.unregister::<Screen>());
        for screen in [Screen::Profile, Screen::Settings] {
            let err = resolver.resolve::<_, String>(screen).unwrap_err();
            assert!(matches!(err, ResolveError::UnregisteredType { .. }));
        }
    }

    #[test]
    fn test_unregistered_regardless_of_requested_type() {
        let resolver = RouteResolver::new();
        assert!(matches!(
            resolver.resolve::<_, String>(Screen::Profile),
            Err(ResolveError::UnregisteredType { .. })
        ));
        assert!(matches!(
            resolver.resolve::<_, u8>(Screen::Profile),
            Err(ResolveError::UnregisteredType { .. })
        ));
        assert!(matches!(
            resolver.resolve::<_, ()>(Screen::Settings),
            Err(ResolveError::UnregisteredType { .. })
        ));
    }

    #[test]
    fn test_lookalike_route_type_is_distinct() {
        let resolver = screen_resolver();
        let err = resolver.resolve::<_, String>(MirrorScreen::Profile).unwrap_err();
        assert!(matches!(err, ResolveError::UnregisteredType { .. }));
        assert!(err.route().ends_with("MirrorScreen"));
        let _ = MirrorScreen::Settings;
    }

    #[test]
    fn test_replaced_producer_is_never_invoked() {
        let resolver = RouteResolver::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&first);
        resolver.register(move |_: Screen| {
            counter.fetch_add(1, Ordering::SeqCst);
            resolved(1_u8)
        });
        let counter = Arc::clone(&second);
        resolver.register(move |_: Screen| {
            counter.fetch_add(1, Ordering::SeqCst);
            resolved(2_u8)
        });

        for _ in 0..3 {
            assert_eq!(resolver.resolve::<_, u8>(Screen::Profile), Ok(2));
        }
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 3);
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_unregister_absent_is_not_an_error() {
        let resolver = RouteResolver::new();
        assert!(!resolver.unregister::<Screen>());
        assert!(resolver.is_empty());
    }

    #[test]
    fn test_nil_is_reported_before_type_check() {
        let resolver = screen_resolver();
        // Requested type would also mismatch, but the producer's `None` wins.
        let err = resolver.resolve::<_, u32>(Screen::Settings).unwrap_err();
        assert!(matches!(err, ResolveError::ProducerReturnedNil { .. }));
    }

    #[test]
    fn test_route_value_reaches_producer() {
        #[derive(Debug)]
        struct OpenProfile {
            user_id: u64,
        }

        let resolver = RouteResolver::new();
        resolver.register(|route: OpenProfile| resolved(ProfilePage { user_id: route.user_id }));

        let page: ProfilePage = resolver.resolve(OpenProfile { user_id: 9 }).unwrap();
        assert_eq!(page, ProfilePage { user_id: 9 });
    }

    #[test]
    fn test_trait_objects_can_be_resolved() {
        trait Greeter: Send {
            fn greet(&self) -> String;
        }
        struct English;
        impl Greeter for English {
            fn greet(&self) -> String {
                "hello".to_owned()
            }
        }

        let resolver = RouteResolver::new();
        resolver.register(|_: Screen| resolved::<Box<dyn Greeter>>(Box::new(English)));

        let greeter: Box<dyn Greeter> = resolver.resolve(Screen::Profile).unwrap();
        assert_eq!(greeter.greet(), "hello");
    }

    #[test]
    fn test_routable_trait() {
        let resolver = screen_resolver();
        assert!(Screen::is_registered(&resolver));
        assert_eq!(Screen::Profile.resolve::<String>(&resolver).unwrap(), "Profile");

        Screen::register(&resolver, |_| resolved(7_i32));
        assert_eq!(Screen::Settings.resolve::<i32>(&resolver), Ok(7));

        assert!(Screen::unregister(&resolver));
        assert!(!Screen::is_registered(&resolver));
    }

    #[test]
    fn test_error_display_and_context() {
        let resolver = RouteResolver::new();
        let err = resolver
            .resolve::<_, String>(Screen::Profile)
            .context("opening profile from deep link")
            .unwrap_err();

        assert_eq!(err.variant_name(), "UnregisteredType");
        let message = err.to_string();
        assert!(message.starts_with("Unregistered route type (opening profile from deep link): "));
        assert!(message.ends_with("Screen"));
    }

    #[test]
    fn test_concurrent_register_and_resolve() {
        let resolver = screen_resolver();

        std::thread::scope(|scope| {
            for worker in 0..4_u8 {
                let resolver = resolver.clone();
                scope.spawn(move || {
                    for _ in 0..200 {
                        resolver.register(move |value: u8| resolved(value.wrapping_add(worker)));
                        let _ = resolver.resolve::<_, u8>(1_u8);
                        let title: String = resolver.resolve(Screen::Profile).unwrap();
                        assert_eq!(title, "Profile");
                    }
                });
            }
        });

        assert!(resolver.is_registered::<u8>());
        assert_eq!(resolver.len(), 2);
    }
}
