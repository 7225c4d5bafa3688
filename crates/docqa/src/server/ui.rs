//! Single-page upload form

use axum::response::Html;

/// GET / - Upload a document and ask a question about it
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Document QA</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; }
  label { display: block; margin-top: 1rem; font-weight: 600; }
  textarea { width: 100%; min-height: 5rem; }
  button { margin-top: 1rem; padding: .5rem 1.25rem; }
  #answer { white-space: pre-wrap; margin-top: 1.5rem; padding: 1rem; background: #f5f5f5; }
  .error { color: #b00020; }
  .note { color: #6b6b6b; font-size: .9rem; }
</style>
</head>
<body>
<h1>Document question answering</h1>
<p>Upload a document and ask a question about it. Answers are generated by Google Gemini.</p>
<form id="ask">
  <label for="file">Document</label>
  <input id="file" name="file" type="file" accept=".pdf,.txt,.csv,.xlsx,.xls,.doc,.docx" required>
  <label for="question">Question</label>
  <textarea id="question" name="question" placeholder="What are the key points in this document?" required></textarea>
  <button type="submit">Get Answer</button>
</form>
<div id="answer" hidden></div>
<p id="stored" class="note"></p>
<script>
const form = document.getElementById('ask');
const out = document.getElementById('answer');
const stored = document.getElementById('stored');
form.addEventListener('submit', async (event) => {
  event.preventDefault();
  out.hidden = false;
  out.className = '';
  out.textContent = 'Processing your question...';
  stored.textContent = '';
  try {
    const response = await fetch('/api/ask', { method: 'POST', body: new FormData(form) });
    const body = await response.json();
    if (!response.ok) {
      out.className = 'error';
      out.textContent = body.error ? body.error.message : response.statusText;
      return;
    }
    out.textContent = body.answer;
    if (body.object_uri) stored.textContent = 'Stored as ' + body.object_uri;
    if (body.storage_error) stored.textContent = 'Not stored: ' + body.storage_error;
  } catch (err) {
    out.className = 'error';
    out.textContent = String(err);
  }
});
</script>
<hr>
<p class="note">Powered by Google Gemini AI</p>
</body>
</html>
"#;
