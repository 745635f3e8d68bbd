use crate::components::certificate_form::CertificateFormComponent;
use yew::{html, Component, Context, Html};

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="App">
                <nav class="navbar">
                    <h1>{ "GET-CERTIFIED" }</h1>
                </nav>
                <CertificateFormComponent />
            </div>
        }
    }
}
