use crate::models::ClickerView;

/// Renders the single page. With an initial view the clicker is shown
/// straight away, otherwise the team selection.
pub fn render_index(initial: Option<&ClickerView>) -> String {
    let initial_json = initial
        .and_then(|view| serde_json::to_string(view).ok())
        .unwrap_or_else(|| "null".to_string())
        .replace("</", "<\\/");
    INDEX_HTML.replace("{{INITIAL}}", &initial_json)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Team Clicker</title>
  <style>
    :root {
      --blue: #3498db;
      --red: #e74c3c;
      --go: #2ecc71;
      --ink: #ffffff;
      --muted: #cccccc;
      --panel: #1a1a1a;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      display: flex;
      align-items: center;
      justify-content: center;
      background: #000000;
      color: var(--ink);
      font-family: system-ui, sans-serif;
      overflow: hidden;
    }

    .orb {
      position: fixed;
      width: 300px;
      height: 300px;
      border-radius: 50%;
      opacity: 0.3;
      filter: blur(40px);
      z-index: -1;
    }

    .orb.blue {
      background: var(--blue);
      top: -100px;
      left: -100px;
      animation: drift-blue 12s ease-in-out infinite;
    }

    .orb.red {
      background: var(--red);
      bottom: -80px;
      right: -100px;
      animation: drift-red 10s ease-in-out infinite;
    }

    @keyframes drift-blue {
      50% { transform: translate(50px, 50px); }
    }

    @keyframes drift-red {
      50% { transform: translate(-50px, -50px); }
    }

    main {
      width: min(420px, 90vw);
      text-align: center;
    }

    [hidden] {
      display: none !important;
    }

    h1 {
      font-size: 24px;
    }

    .teams {
      display: flex;
      justify-content: center;
      gap: 20px;
    }

    .team-button {
      padding: 20px;
      border-radius: 10px;
      border: 3px solid transparent;
      color: var(--ink);
      font-size: 18px;
      font-weight: bold;
      cursor: pointer;
    }

    .team-button.blue { background: var(--blue); border-color: var(--blue); }
    .team-button.red { background: var(--red); border-color: var(--red); }
    .team-button.blue.selected { border-color: #1c598a; }
    .team-button.red.selected { border-color: #a8322a; }

    input {
      width: 80%;
      margin-top: 20px;
      padding: 10px;
      border: 1px solid var(--muted);
      border-radius: 10px;
      color: var(--ink);
      background: var(--panel);
    }

    .note {
      color: var(--muted);
      font-size: 14px;
      margin: 20px auto 0;
      width: 80%;
    }

    .go, .click {
      margin-top: 20px;
      padding: 15px 30px;
      border: none;
      border-radius: 10px;
      color: var(--ink);
      font-size: 18px;
      font-weight: bold;
      cursor: pointer;
    }

    .go { background: var(--go); }

    .click {
      width: 180px;
      height: 180px;
      border-radius: 50%;
      font-size: 28px;
    }

    .bar {
      display: flex;
      height: 24px;
      border-radius: 12px;
      overflow: hidden;
      background: var(--panel);
    }

    .bar .blue { background: var(--blue); transition: width 0.3s; }
    .bar .red { background: var(--red); transition: width 0.3s; }

    .totals {
      display: flex;
      justify-content: space-between;
      margin-top: 8px;
      font-size: 18px;
    }

    .personal {
      margin-top: 30px;
      color: var(--muted);
    }

    .error {
      color: var(--red);
      min-height: 1.2em;
    }
  </style>
</head>
<body>
  <div class="orb blue"></div>
  <div class="orb red"></div>

  <main>
    <section id="select">
      <h1>Choose your team!</h1>
      <div class="teams">
        <button class="team-button blue" data-team="blue">Blue Team</button>
        <button class="team-button red" data-team="red">Red Team</button>
      </div>
      <input id="username" placeholder="Enter your username" autocomplete="off" />
      <p class="note">Note: If you create a new user, you will no longer have access to your previous user data.</p>
      <button id="go" class="go">Go!</button>
      <p id="error" class="error"></p>
    </section>

    <section id="clicker" hidden>
      <h1 id="greeting"></h1>
      <div class="bar">
        <div id="blue-bar" class="blue"></div>
        <div id="red-bar" class="red"></div>
      </div>
      <div class="totals">
        <span id="blue-count">0</span>
        <span id="red-count">0</span>
      </div>
      <button id="click" class="click">Click!</button>
      <p class="personal">Your clicks: <span id="personal-count">0</span></p>
      <button id="switch" class="go">Switch user</button>
    </section>
  </main>

  <script>
    const initial = {{INITIAL}};
    const selectEl = document.getElementById('select');
    const clickerEl = document.getElementById('clicker');
    const usernameEl = document.getElementById('username');
    const errorEl = document.getElementById('error');
    const teamButtons = Array.from(document.querySelectorAll('.team-button'));

    let team = null;

    const render = (view) => {
      selectEl.hidden = true;
      clickerEl.hidden = false;
      document.getElementById('greeting').textContent = `Hi ${view.username}!`;
      document.getElementById('blue-bar').style.width = `${view.bluePercent}%`;
      document.getElementById('red-bar').style.width = `${view.redPercent}%`;
      document.getElementById('blue-count').textContent = view.blueCount;
      document.getElementById('red-count').textContent = view.redCount;
      document.getElementById('personal-count').textContent = view.personalCount;
      document.getElementById('click').style.background = view.color;
    };

    const showSelection = () => {
      clickerEl.hidden = true;
      selectEl.hidden = false;
    };

    teamButtons.forEach((button) => {
      button.addEventListener('click', () => {
        team = button.dataset.team;
        teamButtons.forEach((other) => other.classList.toggle('selected', other === button));
      });
    });

    document.getElementById('go').addEventListener('click', async () => {
      errorEl.textContent = '';
      const res = await fetch('/api/register', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ team, username: usernameEl.value }),
      });
      if (!res.ok) {
        errorEl.textContent = await res.text();
        return;
      }
      const registration = await res.json();
      const params = new URLSearchParams(registration);
      const view = await fetch(`/api/clicker?${params}`);
      render(await view.json());
    });

    document.getElementById('click').addEventListener('click', async () => {
      const res = await fetch('/api/clicker/tap', { method: 'POST' });
      if (res.ok) {
        render(await res.json());
      }
    });

    document.getElementById('switch').addEventListener('click', async () => {
      await fetch('/api/session', { method: 'DELETE' });
      showSelection();
    });

    if (initial) {
      render(initial);
    }
  </script>
</body>
</html>
"#;
