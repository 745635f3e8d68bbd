pub mod certificate_form;
