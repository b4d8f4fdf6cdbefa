//! Test fixtures for Folio integration tests.

/// Site with a blog, one post with three images and a PDF, and two users.
pub const SITE_FIXTURE: &str = r#"
site:
  title: Example
  url: https://example.com
  files:
    - filename: logo.svg
pages:
  - slug: blog
    title: Blog
    children:
      - slug: first-post
        title: First Post
        template: article
        content:
          summary: Hello
        files:
          - filename: b.jpg
            template: image
            sort: 2
            size: 2048
            width: 1200
            height: 800
            content:
              alt: A bird
          - filename: a.jpg
            template: image
            sort: 2
          - filename: c.jpg
            template: image
            sort: 1
          - filename: notes.pdf
            size: 1536
users:
  - id: ada
    username: Ada
"#;

pub const SITE_BLUEPRINT: &str = r#"
title: Site
sections:
  notes:
    type: info
    text: Welcome to {{ site.title }}
"#;

pub const ARTICLE_BLUEPRINT: &str = r#"
title: Article
icon: file-document
image: page.image
tabs:
  content:
    label: Content
    fields:
      summary:
        type: text
        maxlength: 80
      body:
        type: blocks
  seo:
    label: SEO
    icon: search
    fields:
      description:
        type: text
"#;

pub const IMAGE_BLUEPRINT: &str = r#"
title: Image
accept: image/jpeg
image:
  back: black
options:
  delete: false
fields:
  caption:
    type: text
"#;

pub const CARD_COMPONENT: &str = r#"
mixins: [bordered]
props:
  title:
    type: string
  size:
    type: string
    default: medium
    values: [small, medium, large]
computed:
  heading: "{{ title }} ({{ size }})"
"#;

pub const BORDERED_MIXIN: &str = r#"
props:
  border: thin
"#;
