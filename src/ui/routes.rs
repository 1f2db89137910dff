/// Client-side pages. View-model actions return one of these when the user
/// has to be sent elsewhere, instead of driving a browser router.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    MyBooks,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::MyBooks => "/MyBooks",
        }
    }
}
