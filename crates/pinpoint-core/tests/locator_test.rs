use pinpoint_common::NodeId;
use pinpoint_core::locator::{Action, ActionOptions, Assertion, LocatorGenerator, MouseButton};
use pinpoint_core::SelectorResolver;
use pinpoint_html::HtmlDom;

fn find(dom: &HtmlDom, css: &str) -> NodeId {
    dom.select_first(css).unwrap().unwrap()
}

fn locators(dom: &HtmlDom, node: NodeId) -> Vec<String> {
    LocatorGenerator::default().generate_locators(&mut SelectorResolver::new(), dom, node, false)
}

#[test]
fn test_locators_most_stable_first() {
    let dom = HtmlDom::parse_fragment(r#"<button data-testid="save-btn">Save</button>"#);
    let button = find(&dom, "button");

    let locators = locators(&dom, button);
    assert_eq!(
        locators,
        vec![
            "page.getByTestId(`save-btn`)",
            "page.getByRole(`button`, { name: `Save` })",
            "page.getByText(`Save`, { exact: true })",
            "page.locator(`button`)",
        ]
    );
}

#[test]
fn test_form_control_locators() {
    let dom = HtmlDom::parse_fragment(
        r#"<label for="user-email">Email</label><input id="user-email" name="email">"#,
    );
    let input = find(&dom, "input");

    let locators = locators(&dom, input);
    assert_eq!(locators[0], "page.getByRole(`textbox`, { name: `Email` })");
    assert!(locators.contains(&"page.locator(`#user-email`)".to_string()));
    assert!(locators.contains(&"page.locator(`[name=\\\"email\\\"]`)".to_string()));
}

#[test]
fn test_icon_inside_clickable_container() {
    let dom = HtmlDom::parse_fragment(
        r#"<button class="icon-btn close"><svg class="icon"><path d="M0 0"></path></svg></button>"#,
    );
    let svg = find(&dom, "svg");

    let locators = locators(&dom, svg);
    assert_eq!(locators[0], "page.locator(`.icon-btn.close`)");
    assert!(locators.contains(&"page.locator(`.icon-btn.close > svg`)".to_string()));
    assert!(locators.contains(&"page.locator(`svg.icon`)".to_string()));
}

#[test]
fn test_nth_locator_for_repeated_tags() {
    let dom = HtmlDom::parse_fragment("<ul><li></li><li></li><li></li></ul>");
    let second = dom.select("li").unwrap()[1];

    let locators = locators(&dom, second);
    assert_eq!(
        locators,
        vec!["page.locator(`li:nth-of-type(2)`)", "page.locator(`li`).nth(1)"]
    );
}

#[test]
fn test_ambiguous_css_adds_first_and_parent_chain() {
    let dom = HtmlDom::parse_fragment(
        r#"<div class="panel"><span class="dot"></span></div><div class="panel"><span class="dot"></span></div>"#,
    );
    let span = find(&dom, "span");

    let locators = locators(&dom, span);
    assert!(locators.iter().any(|l| l.ends_with(".first()")));
    assert!(locators.contains(&"page.locator(`.panel > span`)".to_string()));
    assert!(locators.contains(&"page.locator(`span`).nth(0)".to_string()));
}

#[test]
fn test_unknown_element_has_no_locators() {
    let dom = HtmlDom::parse_fragment("<div></div>");
    let locators = LocatorGenerator::default().generate_locators(
        &mut SelectorResolver::new(),
        &dom,
        NodeId(404),
        false,
    );
    assert!(locators.is_empty());
}

#[test]
fn test_generate_commands() {
    let dom = HtmlDom::parse_fragment(r#"<button data-testid="save-btn">Save</button>"#);
    let button = find(&dom, "button");
    let options = ActionOptions {
        button: MouseButton::Right,
        modifiers: vec![],
    };

    let commands = LocatorGenerator::default().generate_commands(
        &mut SelectorResolver::new(),
        &dom,
        button,
        &Action::Click,
        &options,
    );
    assert_eq!(commands.len(), 4);
    assert_eq!(
        commands[0],
        r#"await page.getByTestId(`save-btn`).click({"button":"right"});"#
    );
}

#[test]
fn test_text_assertions_skip_text_locator() {
    let dom = HtmlDom::parse_fragment(r#"<button data-testid="save-btn">Save</button>"#);
    let button = find(&dom, "button");
    let generator = LocatorGenerator::default();
    let mut resolver = SelectorResolver::new();

    let assertions = generator.generate_assertions(
        &mut resolver,
        &dom,
        button,
        &Assertion::ToHaveText("Save".into()),
    );
    assert_eq!(assertions.len(), 3);
    assert!(assertions.iter().all(|a| !a.contains("getByText")));
    assert_eq!(
        assertions[0],
        "await expect(page.getByTestId(`save-btn`)).toHaveText(`Save`);"
    );

    let visible =
        generator.generate_assertions(&mut resolver, &dom, button, &Assertion::ToBeVisible);
    assert_eq!(visible.len(), 4);
}
