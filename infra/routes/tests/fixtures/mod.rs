use coord_route_hub::{Routable, RouteResolver, resolved};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Profile,
    Settings,
}

impl Routable for Screen {}

/// Same variants as [`Screen`], unrelated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorScreen {
    Profile,
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePage {
    pub user_id: u64,
}

pub fn screen_resolver() -> RouteResolver {
    let resolver = RouteResolver::new();
    resolver.register(|screen: Screen| match screen {
        Screen::Profile => resolved(String::from("Profile")),
        Screen::Settings => None,
    });
    resolver
}
