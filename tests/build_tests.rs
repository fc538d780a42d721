//! End-to-end construction and text serialization tests

use xmlkit::{
    attr, attrs, build, comment, document, processing_instruction, raw,
    render_node_to_string, render_to_string, text, Builder, Category, Content,
    DocumentOptions, ErrorKind,
};

#[test]
fn test_escaped_text_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let node = build("p", "Hello & Universe!")?;
    assert_eq!(render_node_to_string(&node)?, "<p>Hello &amp; Universe!</p>");
    Ok(())
}

#[test]
fn test_childless_element_self_closes() -> Result<(), Box<dyn std::error::Error>> {
    let node = build("hr", ())?;
    assert_eq!(render_node_to_string(&node)?, "<hr/>");
    Ok(())
}

#[test]
fn test_doctype_with_and_without_declaration() -> Result<(), Box<dyn std::error::Error>> {
    let b = Builder::new();
    let quiet = b.document_with(
        b.build("html", ())?,
        DocumentOptions {
            doctype: Some("<!DOCTYPE html>".to_string()),
            omit_declaration: true,
            ..DocumentOptions::default()
        },
    )?;
    assert_eq!(render_to_string(&quiet)?, "<!DOCTYPE html><html/>");

    let declared = b.document_with(
        b.build("html", ())?,
        DocumentOptions {
            doctype: Some("<!DOCTYPE html>".to_string()),
            ..DocumentOptions::default()
        },
    )?;
    assert_eq!(
        render_to_string(&declared)?,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><!DOCTYPE html><html/>"
    );
    Ok(())
}

#[test]
fn test_named_attributes_override_mapping() -> Result<(), Box<dyn std::error::Error>> {
    let b = Builder::new();
    let node = b.build_with(
        "input",
        attrs([("type", "text"), ("value", "mapped")]),
        [("value", "named")],
    )?;
    assert_eq!(
        render_node_to_string(&node)?,
        "<input type=\"text\" value=\"named\"/>"
    );
    Ok(())
}

#[test]
fn test_flattening_is_associative() -> Result<(), Box<dyn std::error::Error>> {
    let nested = build("e", (("a", vec!["b", "c"]),))?;
    let flat = build("e", ("a", "b", "c"))?;
    assert_eq!(nested, flat);
    assert_eq!(render_node_to_string(&nested)?, "<e>abc</e>");
    Ok(())
}

#[test]
fn test_comment_validation_and_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let err = comment("no -- allowed").unwrap_err();
    assert_eq!(err.category(), Category::Validation);
    assert_eq!(err.kind(), &ErrorKind::CommentDoubleHyphen);

    let node = comment("quite fine")?;
    assert_eq!(render_node_to_string(&node)?, "<!--quite fine-->");
    Ok(())
}

#[test]
fn test_full_document() -> Result<(), Box<dyn std::error::Error>> {
    let b = Builder::new();
    let br = b.build("br", ())?;
    let doc = b.document_with(
        b.build(
            "article",
            (
                attr("lang", "en"),
                b.build(
                    "h1",
                    (text("<Example>"), attr("data", "to quote: <&>\"'")),
                )?,
                b.build(
                    "p",
                    (
                        attr("umlaut-attribute", "äöüß"),
                        "Hello",
                        b.build("em", (" World", attr("count", "1")))?,
                        "!",
                    ),
                )?,
                None::<&str>,
                b.build(
                    "div",
                    (
                        b.build("data-element", "äöüß <&>")?,
                        b.embed((
                            "<p attr=\"value\">raw content</p>Some Text",
                            br,
                            Content::items(0..3),
                        ))?,
                        Content::items(3..6),
                    ),
                )?,
                b.comment("<This is a comment!>")?,
                b.processing_instruction("pi-target", "<PI content>")?,
                b.processing_instruction("pi-without-content", "")?,
            ),
        )?,
        DocumentOptions {
            doctype: Some("<!DOCTYPE section>".to_string()),
            omit_declaration: true,
            ..DocumentOptions::default()
        },
    )?;

    let expected = concat!(
        "<!DOCTYPE section>",
        "<article lang=\"en\">",
        "<h1 data=\"to quote: &lt;&amp;&gt;&quot;'\">&lt;Example&gt;</h1>",
        "<p umlaut-attribute=\"äöüß\">Hello<em count=\"1\"> World</em>!</p>",
        "<div><data-element>äöüß &lt;&amp;&gt;</data-element>",
        "<p attr=\"value\">raw content</p>Some Text<br/>012345</div>",
        "<!--<This is a comment!>-->",
        "<?pi-target <PI content>?>",
        "<?pi-without-content?>",
        "</article>",
    );
    assert_eq!(render_to_string(&doc)?, expected);
    Ok(())
}

#[test]
fn test_lazy_children_defer_work() -> Result<(), Box<dyn std::error::Error>> {
    let node = build(
        "ul",
        Content::lazy(|| {
            (0..3)
                .map(|i| build("li", i.to_string()))
                .collect::<Result<Vec<_>, _>>()
                .unwrap_or_default()
        }),
    )?;
    assert_eq!(
        render_node_to_string(&node)?,
        "<ul><li>0</li><li>1</li><li>2</li></ul>"
    );
    Ok(())
}

#[test]
fn test_raw_and_text_coexist() -> Result<(), Box<dyn std::error::Error>> {
    let node = build("div", (raw("<i>kept</i>"), text("<i>escaped</i>")))?;
    assert_eq!(
        render_node_to_string(&node)?,
        "<div><i>kept</i>&lt;i&gt;escaped&lt;/i&gt;</div>"
    );
    Ok(())
}

#[test]
fn test_pi_construction_errors() {
    assert!(processing_instruction("xml", "anything").is_err());
    let err = processing_instruction("ok", "bad ?> content").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::PiContentTerminator);
}

#[test]
fn test_document_without_root_element() -> Result<(), Box<dyn std::error::Error>> {
    let b = Builder::new();
    let doc = b.document_with(
        (b.comment("placeholder")?, b.processing_instruction("pi", "")?),
        DocumentOptions {
            omit_declaration: true,
            ..DocumentOptions::default()
        },
    )?;
    assert_eq!(render_to_string(&doc)?, "<!--placeholder--><?pi?>");
    Ok(())
}

#[test]
fn test_structure_errors_surface() -> Result<(), Box<dyn std::error::Error>> {
    let b = Builder::new();
    let err = b.document((b.build("a", ())?, b.build("b", ())?)).unwrap_err();
    assert_eq!(err.category(), Category::Structure);

    let err = b.embed(attr("stray", "pair")).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::AttributesOutsideElement);

    let err = document("text has no place at document level").unwrap_err();
    assert_eq!(err.category(), Category::UnsupportedChild);
    Ok(())
}

#[test]
fn test_unicode_content_passes_through() -> Result<(), Box<dyn std::error::Error>> {
    let node = build("p", "äöüß ₰")?;
    assert_eq!(render_node_to_string(&node)?, "<p>äöüß ₰</p>");
    Ok(())
}
