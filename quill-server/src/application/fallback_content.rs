use crate::domain::generation::{GeneratedArticle, GenerationRequest};

/// Шаблонная статья на случай, когда модель недоступна.
/// Детерминирована: одинаковый запрос даёт побайтно одинаковый результат.
pub(crate) fn fallback_article(req: &GenerationRequest) -> GeneratedArticle {
    let title = &req.title;
    let subject = req.subject();
    let style = req.tone.style_phrase();

    let content = format!(
        r#"
<h1>{title}</h1>

<p>Welcome to our comprehensive guide on {subject}. In this {style} article, we'll explore the key aspects of this important topic and provide you with valuable insights and practical information.</p>

<h2>Understanding the Basics</h2>

<p>To begin our exploration, it's essential to understand the fundamental concepts that underpin this subject. Whether you're a beginner or an experienced professional, having a solid foundation is crucial for success.</p>

<ul>
<li>Key concept 1: Understanding the core principles</li>
<li>Key concept 2: Identifying important factors</li>
<li>Key concept 3: Recognizing common challenges</li>
</ul>

<h2>Why This Matters</h2>

<p>In today's rapidly evolving landscape, staying informed about {subject} is more important than ever. The decisions we make today can have lasting impacts on our future success and growth.</p>

<p>Consider these important factors:</p>

<ol>
<li><strong>Impact on daily operations:</strong> How this affects your routine activities</li>
<li><strong>Long-term benefits:</strong> The advantages of proper implementation</li>
<li><strong>Risk mitigation:</strong> Strategies to avoid common pitfalls</li>
</ol>

<h2>Best Practices and Strategies</h2>

<p>Based on extensive research and real-world experience, here are some proven strategies that can help you achieve better results:</p>

<blockquote>
<p><em>"Success in this area requires a combination of knowledge, practice, and continuous learning."</em></p>
</blockquote>

<p>Some effective approaches include:</p>

<ul>
<li>Regular assessment and evaluation</li>
<li>Continuous learning and adaptation</li>
<li>Collaboration with experts and peers</li>
<li>Implementation of proven methodologies</li>
</ul>

<h2>Common Challenges and Solutions</h2>

<p>Every journey comes with its own set of challenges. Here are some common obstacles you might encounter and practical solutions to overcome them:</p>

<h3>Challenge 1: Getting Started</h3>
<p>Many people struggle with taking the first step. The solution is to break down the process into smaller, manageable tasks.</p>

<h3>Challenge 2: Maintaining Consistency</h3>
<p>Consistency is key to long-term success. Establish clear routines and stick to them.</p>

<h3>Challenge 3: Measuring Progress</h3>
<p>Set clear metrics and regularly track your progress to stay motivated and on track.</p>

<h2>Looking Ahead</h2>

<p>As we look to the future, it's clear that {subject} will continue to play a vital role in our personal and professional development. By staying informed and proactive, you can position yourself for success in this evolving landscape.</p>

<h2>Conclusion</h2>

<p>In conclusion, mastering {subject} requires dedication, patience, and a willingness to learn. By following the strategies outlined in this guide and maintaining a commitment to continuous improvement, you can achieve your goals and unlock new opportunities for growth and success.</p>

<p>Remember, the journey of a thousand miles begins with a single step. Start today, and you'll be amazed at how far you can go.</p>
"#
    );

    let summary = format!(
        "This comprehensive guide explores {subject}, covering essential concepts, best practices, and practical strategies. Whether you're a beginner or experienced professional, this article provides valuable insights to help you succeed in this important area."
    );

    GeneratedArticle {
        content,
        title: title.clone(),
        summary,
        is_fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::fallback_article;
    use crate::domain::generation::{GenerationRequest, Length, Tone};

    fn request(title: &str, topic: Option<&str>, tone: Tone) -> GenerationRequest {
        GenerationRequest {
            title: title.to_string(),
            topic: topic.map(str::to_string),
            tone,
            length: Length::Medium,
        }
    }

    #[test]
    fn article_contains_title_and_is_flagged() {
        let article = fallback_article(&request("Rust Ownership", None, Tone::Professional));

        assert!(article.is_fallback);
        assert_eq!(article.title, "Rust Ownership");
        assert!(article.content.contains("<h1>Rust Ownership</h1>"));
        assert!(article.content.contains("guide on rust ownership."));
        assert!(article.content.contains("professional and authoritative"));
        assert!(article.summary.starts_with("This comprehensive guide explores rust ownership,"));
    }

    #[test]
    fn explicit_topic_replaces_lowercased_title() {
        let article = fallback_article(&request(
            "Borrowing",
            Some("the borrow checker"),
            Tone::Casual,
        ));

        assert!(article.content.contains("mastering the borrow checker requires"));
        assert!(article.content.contains("friendly and conversational"));
        assert!(!article.content.contains("mastering borrowing"));
    }

    #[test]
    fn output_is_deterministic() {
        let req = request("Same Input", Some("determinism"), Tone::Academic);
        assert_eq!(fallback_article(&req), fallback_article(&req));
    }

    #[test]
    fn length_does_not_change_template() {
        let mut short = request("Sizes", None, Tone::Conversational);
        short.length = Length::Short;
        let mut long = short.clone();
        long.length = Length::Long;

        assert_eq!(fallback_article(&short).content, fallback_article(&long).content);
    }
}
