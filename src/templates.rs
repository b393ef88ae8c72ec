use tera::Tera;

/// Templates are compiled into the binary; `.html` names keep tera's autoescaping on.
pub fn build() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (
            "success_panel.html",
            include_str!("../templates/success_panel.html"),
        ),
        ("signup.html", include_str!("../templates/signup.html")),
    ])?;
    Ok(tera)
}
